//! Process-wide logging setup for Pragati clients.

/// Initialize process-wide observability with settings read from the
/// environment.
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init() -> bool {
    tracing::init_with(&tracing::LogConfig::from_env())
}

/// Subscriber configuration and installation.
pub mod tracing;

pub use crate::tracing::{LogConfig, LogFormat};
