//! Header and sidebar around authenticated pages.

use serde::Serialize;

use pragati_core::AuthState;

use crate::routes::Route;

/// Sidebar entries, in display order.
pub const NAV_ENTRIES: [(Route, &str); 6] = [
    (Route::Dashboard, "Dashboard"),
    (Route::CompanyInfo, "Company Info"),
    (Route::Items, "Items"),
    (Route::Parties, "Parties"),
    (Route::Invoices, "Invoices"),
    (Route::Reports, "Reports"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub user_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub route: Route,
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub entries: Vec<NavEntry>,
}

impl Sidebar {
    pub fn for_route(active: Route) -> Self {
        let entries = NAV_ENTRIES
            .iter()
            .map(|&(route, label)| NavEntry {
                route,
                label,
                href: route.path(),
                active: route == active,
            })
            .collect();
        Self { entries }
    }

    pub fn active(&self) -> Option<&NavEntry> {
        self.entries.iter().find(|e| e.active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chrome {
    pub header: Header,
    pub sidebar: Sidebar,
}

impl Chrome {
    /// Chrome for `route`, or `None` when nobody is signed in.
    pub fn for_route(route: Route, state: &AuthState) -> Option<Self> {
        let user = state.user()?;
        let (title, subtitle) = route.heading();
        Some(Self {
            header: Header {
                title,
                subtitle,
                user_email: user.email.clone(),
            },
            sidebar: Sidebar::for_route(route),
        })
    }
}
