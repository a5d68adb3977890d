//! Route protection.
//!
//! - No IO
//! - No panics
//! - No side effects (pure decision over the current `AuthState`)
//!
//! The guard is generic over the route type so the shell can plug in its own
//! route table.

use pragati_core::AuthState;

/// Who may see a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only reachable with an authenticated session.
    Protected,
    /// Only reachable without a session (login screen).
    GuestOnly,
    /// Reachable by everyone.
    Public,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision<R> {
    Render,
    Redirect(R),
}

/// A guarded view: either the child itself, or a redirect in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<V, R> {
    Child(V),
    Redirect(R),
}

/// Redirect targets for denied navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard<R> {
    login: R,
    home: R,
}

impl<R: Clone> RouteGuard<R> {
    /// `login` is where anonymous users go; `home` is where signed-in users
    /// are sent away from guest-only views.
    pub fn new(login: R, home: R) -> Self {
        Self { login, home }
    }

    pub fn login_route(&self) -> &R {
        &self.login
    }

    pub fn home_route(&self) -> &R {
        &self.home
    }

    pub fn check(&self, state: &AuthState, access: Access) -> GuardDecision<R> {
        match (access, state.is_authenticated()) {
            (Access::Protected, false) => GuardDecision::Redirect(self.login.clone()),
            (Access::GuestOnly, true) => GuardDecision::Redirect(self.home.clone()),
            _ => GuardDecision::Render,
        }
    }

    /// Wrap a child view. The child is only built when it will be shown.
    pub fn render<V>(&self, state: &AuthState, access: Access, child: impl FnOnce() -> V) -> Guarded<V, R> {
        match self.check(state, access) {
            GuardDecision::Render => Guarded::Child(child()),
            GuardDecision::Redirect(to) => Guarded::Redirect(to),
        }
    }
}
