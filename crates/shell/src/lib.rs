//! `pragati-shell`
//!
//! **Responsibility:** the client application shell.
//!
//! This crate provides:
//! - The route table and guarded navigation
//! - Header and sidebar for signed-in users
//! - Login and company sign-up flows
//! - Startup wiring (logging, session store, auth context, API client)
//!
//! Pages themselves are rendered by the UI layer; the shell only decides
//! which one is shown and with what chrome.

pub mod app;
pub mod chrome;
pub mod config;
pub mod navigation;
pub mod routes;
pub mod screens;

use anyhow::Context;

use pragati_api::ApiClient;
use pragati_auth::{AuthContext, SessionStore};

pub use app::{AppShell, ShellView};
pub use chrome::{Chrome, Header, NavEntry, Sidebar};
pub use config::AppConfig;
pub use navigation::{Navigation, resolve};
pub use routes::{Route, UnknownRoute};
pub use screens::{LoginScreen, ScreenOutcome, SignupForm, SignupScreen};

/// Build a ready-to-use shell from `config`.
///
/// Must be called inside a tokio runtime.
pub fn bootstrap(config: AppConfig) -> anyhow::Result<AppShell> {
    pragati_observability::init();

    let store = SessionStore::open(&config.session_dir)
        .with_context(|| format!("failed to open session store at {}", config.session_dir.display()))?;
    let auth = AuthContext::initialize(store);

    let api = ApiClient::new(config.api.clone()).context("failed to build API client")?;
    tracing::info!(
        api = config.api.base_url(),
        session_dir = %config.session_dir.display(),
        authenticated = auth.is_authenticated(),
        "shell started"
    );

    Ok(AppShell::new(auth, api))
}
