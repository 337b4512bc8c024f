use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_SERVICE_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid service base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub service_base_url: String,
    /// Where signed documents are written outside the browser.
    pub download_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_base_url: DEFAULT_SERVICE_BASE_URL.to_owned(),
            download_dir: PathBuf::from("."),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        let trimmed = url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        self.service_base_url = trimmed.to_owned();
        Ok(self)
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.service_base_url,
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let cfg = ClientConfig::default()
            .with_base_url("https://sign.example.com/api/")
            .expect("valid url");
        assert_eq!(cfg.endpoint("/sign"), "https://sign.example.com/api/sign");
        assert_eq!(cfg.endpoint("verify"), "https://sign.example.com/api/verify");
    }

    #[test]
    fn default_targets_local_service() {
        assert_eq!(
            ClientConfig::default().endpoint("revoke"),
            "http://localhost:8000/revoke"
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(ClientConfig::default().with_base_url("not a url").is_err());
        assert!(ClientConfig::default()
            .with_base_url("ftp://files.example.com")
            .is_err());
    }
}
