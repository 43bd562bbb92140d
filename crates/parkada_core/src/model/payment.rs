//! Payment records grouped by billing period.
//!
//! # Invariants
//! - Every record belongs to exactly one [`PaymentPeriod`].
//! - Period order is insertion order.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Amount in whole currency units.
pub type Amount = u64;

/// Settlement state of one payment.
///
/// Deserialization is case-insensitive; unrecognized statuses become
/// [`PaymentStatus::Overdue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }

    /// Parses a status case-insensitively, falling back to `Overdue`.
    pub fn parse_or_overdue(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "paid" => Self::Paid,
            "pending" => Self::Pending,
            _ => Self::Overdue,
        }
    }

    /// Capitalized label shown inside the status badge.
    pub fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
        }
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_overdue(raw.as_str()))
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One payment line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub vehicle_type: String,
    pub plate: String,
    pub status: PaymentStatus,
    pub date: NaiveDate,
    pub amount: Amount,
}

/// Billing period (e.g. a semester) and its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    /// Opaque period key, e.g. `1st Semester, AY 2025-2026`.
    pub label: String,
    pub records: Vec<PaymentRecord>,
}

impl PaymentPeriod {
    pub fn new(label: impl Into<String>, records: Vec<PaymentRecord>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }
}
