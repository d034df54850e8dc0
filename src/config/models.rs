// src/config/models.rs
use serde::Deserialize;
use std::time::Duration;

/// One configured endpoint. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSpec {
    pub name: String,
    pub url: String,
    pub expected_status: u16,
    pub timeout_secs: u64,
}

impl SiteSpec {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        expected_status: u16,
        timeout_secs: u64,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            expected_status,
            timeout_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The caller's override wins over the configured timeout.
    pub fn effective_timeout(&self, override_secs: Option<u64>) -> Duration {
        override_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.timeout())
    }
}

/// A site section as written in the file, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SiteSection {
    #[serde(default, alias = "URL", alias = "Url")]
    pub url: Option<String>,

    #[serde(default, alias = "Timeout")]
    pub timeout: Option<i64>,

    #[serde(default, alias = "Expected")]
    pub expected: Option<i64>,
}

impl SiteSection {
    /// Fill any key this section leaves out from `defaults`.
    pub fn with_defaults(self, defaults: &SiteSection) -> Self {
        Self {
            url: self.url.or_else(|| defaults.url.clone()),
            timeout: self.timeout.or(defaults.timeout),
            expected: self.expected.or(defaults.expected),
        }
    }

    pub fn into_spec(self, name: String) -> Result<SiteSpec, String> {
        let url = match self.url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => return Err(format!("site {name} is missing URL")),
        };

        let timeout = self
            .timeout
            .ok_or_else(|| format!("site {name} is missing Timeout"))?;
        if timeout < 1 {
            return Err(format!(
                "site {name}: Timeout must be at least 1 second, got {timeout}"
            ));
        }

        let expected = self
            .expected
            .ok_or_else(|| format!("site {name} is missing Expected"))?;
        if !(100..=999).contains(&expected) {
            return Err(format!(
                "site {name}: Expected must be an HTTP status code, got {expected}"
            ));
        }

        Ok(SiteSpec {
            name,
            url,
            expected_status: expected as u16,
            timeout_secs: timeout as u64,
        })
    }
}
