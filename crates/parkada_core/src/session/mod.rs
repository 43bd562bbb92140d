//! Signed-in user surface: profile card, avatar and logout.
//!
//! # Responsibility
//! - Adapt the identity, profile and file collaborators to display values.
//! - Absorb collaborator failures into defined fallbacks.
//!
//! # Invariants
//! - Collaborator errors never propagate past this module as panics.
//! - Profile fields are opaque display strings and are never logged.

pub mod avatar;
pub mod profile;

use crate::config::DashboardConfig;
use serde::{Deserialize, Serialize};

pub const LOGOUT_TITLE: &str = "Logged Out";
pub const LOGOUT_TEXT: &str = "You have successfully logged out.";

/// Confirmation shown after logout, followed by a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutNotice {
    pub title: String,
    pub text: String,
    pub redirect_url: String,
}

impl LogoutNotice {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            title: LOGOUT_TITLE.to_string(),
            text: LOGOUT_TEXT.to_string(),
            redirect_url: config.logout_redirect_url.clone(),
        }
    }
}
