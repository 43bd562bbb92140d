//! Dashboard configuration.
//!
//! # Responsibility
//! - Hold the tunables shared by the entity source, projections and session.
//! - Reject unusable values before any store is built.
//!
//! # Invariants
//! - Every field has a default; partial config documents are accepted.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_SLOT_COUNT: u32 = 48;
pub const DEFAULT_PREVIEW_LEN: usize = 24;
pub const DEFAULT_SECTION: &str = "A";
pub const DEFAULT_SINCE: &str = "09:00";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";
pub const DEFAULT_LOGOUT_REDIRECT_URL: &str = "https://canoneropab2003.github.io/parkada/";

/// Runtime configuration for one dashboard instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of generated slots.
    pub slot_count: u32,
    /// Section prefix used in slot labels.
    pub section: String,
    /// Occupancy start time stamped on generated slots (`HH:MM`).
    pub since: String,
    /// Number of slots shown on the dashboard map preview.
    pub preview_len: usize,
    /// Seed for the sample generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub currency_symbol: String,
    pub logout_redirect_url: String,
    /// `None` uses [`crate::default_log_level`].
    pub log_level: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            section: DEFAULT_SECTION.to_string(),
            since: DEFAULT_SINCE.to_string(),
            preview_len: DEFAULT_PREVIEW_LEN,
            seed: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            logout_redirect_url: DEFAULT_LOGOUT_REDIRECT_URL.to_string(),
            log_level: None,
        }
    }
}

impl DashboardConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// - `slot_count` is zero.
    /// - `section` or `currency_symbol` is blank.
    /// - `since` is not a `HH:MM` time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_count == 0 {
            return Err(ConfigError::ZeroSlotCount);
        }
        if self.section.trim().is_empty() {
            return Err(ConfigError::BlankField("section"));
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::BlankField("currency_symbol"));
        }
        self.since_time()?;
        Ok(())
    }

    /// Parses `since` as a time of day.
    pub fn since_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(self.since.trim(), "%H:%M")
            .map_err(|_| ConfigError::InvalidSince(self.since.clone()))
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroSlotCount,
    BlankField(&'static str),
    InvalidSince(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroSlotCount => write!(f, "slot_count must be >= 1"),
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::InvalidSince(value) => {
                write!(f, "since must be a HH:MM time of day, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}
