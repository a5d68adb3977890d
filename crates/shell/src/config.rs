//! Startup configuration.

use std::path::PathBuf;

use anyhow::Context;

use pragati_api::ApiConfig;

pub const SESSION_DIR_ENV: &str = "PRAGATI_SESSION_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Where the session store keeps its entries.
    pub session_dir: PathBuf,
}

impl AppConfig {
    pub fn new(api: ApiConfig, session_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            session_dir: session_dir.into(),
        }
    }

    /// Read the API settings and `PRAGATI_SESSION_DIR` from the environment.
    /// Without an override, sessions live in the per-user data directory.
    pub fn from_env() -> anyhow::Result<Self> {
        let api = ApiConfig::from_env().context("invalid API configuration")?;

        let session_dir = match std::env::var_os(SESSION_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => pragati_auth::default_session_dir()?,
        };

        Ok(Self { api, session_dir })
    }
}
