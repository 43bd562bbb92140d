//! Page routing for the dashboard shell.
//!
//! # Invariants
//! - Route ids are stable lowercase strings.
//! - Entering [`Route::Notifications`] marks every notification seen; the
//!   sync controller enforces this on navigation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Dashboard page section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    #[default]
    Dashboard,
    Parking,
    Payments,
    Notifications,
    Profile,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Self::Dashboard,
        Self::Parking,
        Self::Payments,
        Self::Notifications,
        Self::Profile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Parking => "parking",
            Self::Payments => "payments",
            Self::Notifications => "notifications",
            Self::Profile => "profile",
        }
    }

    /// Whether opening this page clears unread notifications.
    pub fn marks_notifications_seen(self) -> bool {
        matches!(self, Self::Notifications)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a route id (as carried by nav buttons).
pub fn parse_route(value: &str) -> Result<Route, RouteError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(RouteError::EmptyRoute);
    }
    Route::ALL
        .into_iter()
        .find(|route| route.as_str() == normalized)
        .ok_or_else(|| RouteError::UnknownRoute(normalized.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    EmptyRoute,
    UnknownRoute(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRoute => write!(f, "route must not be empty"),
            Self::UnknownRoute(value) => write!(f, "unknown route: {value}"),
        }
    }
}

impl Error for RouteError {}
