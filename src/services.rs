//! Session and navigation services handed to the listing and booking flows.

use std::fmt;

use tracing::info;

/// Whether a tenant is signed in
pub trait AuthSession: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

/// Signed in iff a bearer token is present
#[derive(Debug, Clone, Default)]
pub struct TokenSession {
    token: Option<String>,
}

impl TokenSession {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl AuthSession for TokenSession {
    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Pages the core can send the user to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    MyBookings,
    Property(u64),
    /// Listing page with a ready-made query, see `filters::search_link`
    Listing(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::MyBookings => "/my-bookings".to_string(),
            Route::Property(id) => format!("/properties/{}", id),
            Route::Listing(link) => link.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Navigator for headless use: records the jump in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: &Route) {
        info!("➡️  Navigating to {}", route);
    }
}
