//! Route table.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use pragati_auth::Access;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    SignUp,
    Dashboard,
    CompanyInfo,
    Items,
    Parties,
    Invoices,
    Stock,
    Reports,
    MyProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route for path `{0}`")]
pub struct UnknownRoute(pub String);

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Login,
        Route::SignUp,
        Route::Dashboard,
        Route::CompanyInfo,
        Route::Items,
        Route::Parties,
        Route::Invoices,
        Route::Stock,
        Route::Reports,
        Route::MyProfile,
    ];

    /// Canonical path.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::SignUp => "/signUp",
            Route::Dashboard => "/dashboard",
            Route::CompanyInfo => "/company-info",
            Route::Items => "/items",
            Route::Parties => "/parties",
            Route::Invoices => "/invoices",
            Route::Stock => "/stock",
            Route::Reports => "/reports",
            Route::MyProfile => "/my-profile",
        }
    }

    /// Match a location path. Query strings and fragments are ignored, as is a
    /// single trailing slash. `/` is not a route of its own.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };

        match path {
            "/login" => Some(Route::Login),
            "/signUp" => Some(Route::SignUp),
            "/dashboard" => Some(Route::Dashboard),
            "/company-info" => Some(Route::CompanyInfo),
            "/items" => Some(Route::Items),
            "/parties" => Some(Route::Parties),
            "/invoices" => Some(Route::Invoices),
            "/stock" => Some(Route::Stock),
            "/reports" => Some(Route::Reports),
            "/my-profile" | "/profile" => Some(Route::MyProfile),
            _ => None,
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Login => Access::GuestOnly,
            Route::SignUp => Access::Public,
            _ => Access::Protected,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.access() == Access::Protected
    }

    /// Header title and subtitle shown above the page.
    pub fn heading(&self) -> (&'static str, &'static str) {
        match self {
            Route::Dashboard => ("Dashboard", "Overview of your business"),
            Route::CompanyInfo => ("Company Info", "Manage company details"),
            Route::Items => ("Items", "Product & service catalog"),
            Route::Parties => ("Parties", "Customer & supplier directory"),
            Route::Invoices => ("Invoices", "Billing & payment records"),
            Route::Stock => ("Stock", "Inventory tracking"),
            Route::Reports => ("Reports", "Sales & purchase analytics"),
            Route::Login | Route::SignUp | Route::MyProfile => ("Welcome", "Get started with Pragati"),
        }
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s).ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}
