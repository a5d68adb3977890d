//! API endpoint configuration, read once at startup.

use std::time::Duration;

use reqwest::Url;

use crate::error::ApiError;

pub const BASE_URL_ENV: &str = "PRAGATI_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "PRAGATI_API_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Configuration for `base_url`. A trailing slash is dropped so endpoint
    /// paths can be appended verbatim.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `PRAGATI_API_BASE_URL` / `PRAGATI_API_TIMEOUT_SECS`, falling back
    /// to the defaults when unset.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    tracing::warn!(value = %raw, "{TIMEOUT_ENV} is not a number of seconds; using default");
                    DEFAULT_TIMEOUT
                }
            },
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self::new(base_url)?.with_timeout(timeout))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as `/api/items`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&url).map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let cfg = ApiConfig::new("http://api.example.com/").unwrap();
        assert_eq!(cfg.base_url(), "http://api.example.com");
        assert_eq!(
            cfg.endpoint("/api/auth/login").unwrap().as_str(),
            "http://api.example.com/api/auth/login"
        );
        assert_eq!(
            cfg.endpoint("api/items").unwrap().as_str(),
            "http://api.example.com/api/items"
        );
    }

    #[test]
    fn base_url_with_prefix_is_preserved() {
        let cfg = ApiConfig::new("http://host:8080/v1").unwrap();
        assert_eq!(
            cfg.endpoint("/api/items?page=2").unwrap().as_str(),
            "http://host:8080/v1/api/items?page=2"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(ApiConfig::new("not a url"), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn default_points_at_local_backend() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
    }
}
