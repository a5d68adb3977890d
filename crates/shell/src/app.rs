//! Application shell: routing, chrome and session wiring.

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use pragati_api::ApiClient;
use pragati_auth::{AuthContext, AuthError, RouteGuard};
use pragati_core::AuthState;

use crate::chrome::Chrome;
use crate::navigation::{Navigation, default_guard, resolve};
use crate::routes::Route;
use crate::screens::{LoginScreen, SignupScreen};

/// Redirect chains longer than this are treated as a routing bug.
const MAX_REDIRECTS: usize = 4;

/// What to draw for a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub route: Route,
    /// Canonical path of `route`; differs from the requested path after a
    /// redirect.
    pub location: &'static str,
    pub redirected: bool,
    /// Header and sidebar; only present for signed-in users.
    pub chrome: Option<Chrome>,
}

/// The running client: one auth context, one API client, one route guard.
///
/// Must be created inside a tokio runtime; it spawns the task that signs the
/// user out when the backend rejects their token.
#[derive(Debug)]
pub struct AppShell {
    auth: AuthContext,
    api: ApiClient,
    guard: RouteGuard<Route>,
    expiry: JoinHandle<()>,
}

impl AppShell {
    pub fn new(auth: AuthContext, api: ApiClient) -> Self {
        let expiry = auth.watch_expiry(api.unauthorized());
        Self {
            auth,
            api,
            guard: default_guard(),
            expiry,
        }
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Auth state changes; re-run [`navigate`](Self::navigate) on each one.
    pub fn state_changes(&self) -> watch::Receiver<AuthState> {
        self.auth.subscribe()
    }

    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(self.auth.clone(), self.api.clone())
    }

    pub fn signup_screen(&self) -> SignupScreen {
        SignupScreen::new(self.auth.clone(), self.api.clone())
    }

    /// Resolve `path` against the current auth state, following redirects.
    pub fn navigate(&self, path: &str) -> ShellView {
        let state = self.auth.state();
        let mut target = resolve(path, &state, &self.guard);
        let mut redirected = false;

        for _ in 0..MAX_REDIRECTS {
            match target {
                Navigation::Render(route) => return self.view(route, redirected, &state),
                Navigation::Redirect(to) => {
                    tracing::debug!(from = path, to = to.path(), "redirect");
                    redirected = true;
                    target = resolve(to.path(), &state, &self.guard);
                }
            }
        }

        let fallback = *self.guard.login_route();
        tracing::error!(path, "redirect loop; falling back to {fallback}");
        self.view(fallback, true, &state)
    }

    /// Sign out. The session is gone from memory even when clearing storage
    /// fails; the returned error is only about persistence.
    pub fn logout(&self) -> Result<ShellView, AuthError> {
        self.auth.logout()?;
        Ok(self.navigate(Route::Login.path()))
    }

    fn view(&self, route: Route, redirected: bool, state: &AuthState) -> ShellView {
        ShellView {
            route,
            location: route.path(),
            redirected,
            chrome: Chrome::for_route(route, state),
        }
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.expiry.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pragati_api::ApiConfig;
    use pragati_auth::SessionStore;
    use pragati_core::{Session, UserProfile};

    fn shell() -> AppShell {
        let auth = AuthContext::initialize(SessionStore::in_memory());
        let api = ApiClient::new(ApiConfig::default()).unwrap();
        AppShell::new(auth, api)
    }

    fn sign_in(shell: &AppShell) {
        shell
            .auth()
            .login(Session::new("abc", UserProfile::new(1, "a@b.com")))
            .unwrap();
    }

    #[tokio::test]
    async fn anonymous_visit_to_protected_page_lands_on_login_without_chrome() {
        let shell = shell();
        let view = shell.navigate("/invoices");
        assert_eq!(view.route, Route::Login);
        assert_eq!(view.location, "/login");
        assert!(view.redirected);
        assert_eq!(view.chrome, None);
    }

    #[tokio::test]
    async fn signed_in_visit_renders_page_with_chrome() {
        let shell = shell();
        sign_in(&shell);

        let view = shell.navigate("/profile");
        assert_eq!(view.route, Route::MyProfile);
        assert!(!view.redirected);
        let chrome = view.chrome.unwrap();
        assert_eq!(chrome.header.title, "Welcome");
        assert_eq!(chrome.header.user_email, "a@b.com");
    }

    #[tokio::test]
    async fn root_goes_to_dashboard_once_signed_in() {
        let shell = shell();
        assert_eq!(shell.navigate("/").route, Route::Login);
        sign_in(&shell);
        assert_eq!(shell.navigate("/").route, Route::Dashboard);
        assert_eq!(shell.navigate("/login").route, Route::Dashboard);
    }

    #[tokio::test]
    async fn logout_returns_to_login_and_protects_pages_again() {
        let shell = shell();
        sign_in(&shell);
        let mut changes = shell.state_changes();

        let view = shell.logout().unwrap();
        assert_eq!(view.route, Route::Login);
        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), AuthState::Anonymous);
        assert_eq!(shell.navigate("/dashboard").route, Route::Login);
    }
}
