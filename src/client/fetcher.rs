// src/client/fetcher.rs
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{0}")]
    Transport(String),
}

/// One bounded HTTP GET, reduced to the response status code.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<u16, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("keeperupper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, limit: Duration) -> Result<u16, FetchError> {
        let target = Url::parse(url).map_err(|e| FetchError::Transport(format!("invalid URL: {e}")))?;

        // reqwest enforces the limit per request; the outer guard covers the
        // rare case where it does not fire.
        let request = self.client.get(target).timeout(limit).send();

        match timeout(limit, request).await {
            Ok(Ok(response)) => Ok(response.status().as_u16()),
            Ok(Err(e)) if e.is_timeout() => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
            Ok(Err(e)) => Err(FetchError::Transport(e.to_string())),
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
        }
    }
}
