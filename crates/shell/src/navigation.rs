//! Location -> route resolution.

use pragati_auth::{GuardDecision, RouteGuard};
use pragati_core::AuthState;

use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// The guard every shell uses: anonymous users go to the login screen,
/// signed-in users visiting it go to the dashboard.
pub fn default_guard() -> RouteGuard<Route> {
    RouteGuard::new(Route::Login, Route::Dashboard)
}

/// Decide what a location shows for the given auth state.
///
/// Unknown paths (including `/`) land on the guard's home or login route.
pub fn resolve(path: &str, state: &AuthState, guard: &RouteGuard<Route>) -> Navigation {
    let Some(route) = Route::from_path(path) else {
        let fallback = if state.is_authenticated() {
            guard.home_route()
        } else {
            guard.login_route()
        };
        return Navigation::Redirect(*fallback);
    };

    match guard.check(state, route.access()) {
        GuardDecision::Render => Navigation::Render(route),
        GuardDecision::Redirect(to) => Navigation::Redirect(to),
    }
}
