// src/error.rs
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that end a run. Every variant reaches `main` unchanged, which
/// alone decides how it is printed and what the process exits with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to load config file {}: {reason}", path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("site {name} not found in config file {}", config.display())]
    SiteNotFound { name: String, config: PathBuf },

    #[error("request to {url} for site {site} failed: {reason}")]
    Transport {
        site: String,
        url: String,
        reason: String,
    },

    #[error("metrics registry failure")]
    Metrics(#[from] prometheus::Error),

    #[error("failed to render report")]
    Render(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn config_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::ConfigLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
