//! Display projections for domain entities.
//!
//! # Responsibility
//! - Map each entity to a display-ready record.
//! - Assemble the full [`DashboardView`] pushed to view targets.
//!
//! # Invariants
//! - Projections never mutate their inputs.
//! - Every mapping is total; unrecognized payment status strings classify as
//!   [`BadgeClass::Red`] and unknown icon names as bell.
//!
//! # See also
//! - crate::sync for the publish side.

mod dashboard;

pub use dashboard::{project_dashboard, DashboardView, ViewOptions};

use crate::aggregate::{percentage_of, period_total, utilization, SlotCounts};
use crate::model::activity::ActivityEntry;
use crate::model::notification::{Notification, NotificationId};
use crate::model::payment::{Amount, PaymentPeriod, PaymentRecord};
use crate::model::slot::{Slot, SlotId, SlotStatus};
use serde::{Deserialize, Serialize};

/// Placeholder shown in a slot cell with no vehicle.
pub const EMPTY_SLOT_LABEL: &str = "—";
const TOOLTIP_SEPARATOR: &str = " • ";

/// One cell of a parking map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCell {
    pub slot_id: SlotId,
    /// Plate, or [`EMPTY_SLOT_LABEL`].
    pub label: String,
    /// Slot label, e.g. `A-05`.
    pub meta: String,
    pub status: SlotStatus,
    pub tooltip: String,
}

impl SlotCell {
    /// Text a search query is matched against.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.label, self.meta)
    }
}

pub fn project_slot(slot: &Slot) -> SlotCell {
    let mut tooltip = format!(
        "{}{}{}",
        slot.label,
        TOOLTIP_SEPARATOR,
        slot.status.as_str().to_ascii_uppercase()
    );
    if !slot.plate.is_empty() {
        tooltip.push_str(TOOLTIP_SEPARATOR);
        tooltip.push_str(slot.plate.as_str());
    }
    SlotCell {
        slot_id: slot.id,
        label: if slot.plate.is_empty() {
            EMPTY_SLOT_LABEL.to_string()
        } else {
            slot.plate.clone()
        },
        meta: slot.label.clone(),
        status: slot.status,
        tooltip,
    }
}

/// Occupancy summary card values. Percentages double as progress widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStatsView {
    pub counts: SlotCounts,
    pub utilization_pct: u32,
    pub available_pct: u32,
    pub occupied_pct: u32,
    pub reserved_pct: u32,
}

pub fn project_stats(counts: SlotCounts) -> SlotStatsView {
    SlotStatsView {
        counts,
        utilization_pct: utilization(&counts),
        available_pct: percentage_of(counts.of(SlotStatus::Available), counts.total),
        occupied_pct: percentage_of(counts.of(SlotStatus::Occupied), counts.total),
        reserved_pct: percentage_of(counts.of(SlotStatus::Reserved), counts.total),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRow {
    /// Icon key; one of `enter|exit|reserve`.
    pub icon: String,
    pub text: String,
    pub time: String,
}

pub fn project_activity(entry: &ActivityEntry) -> ActivityRow {
    ActivityRow {
        icon: entry.kind.as_str().to_string(),
        text: entry.text.clone(),
        time: entry.time.clone(),
    }
}

/// Status badge color bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeClass {
    Green,
    Yellow,
    Red,
}

impl BadgeClass {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Green => "badge--green",
            Self::Yellow => "badge--yellow",
            Self::Red => "badge--red",
        }
    }
}

/// Classifies a payment status string, case-insensitively.
///
/// `paid` is green, `pending` is yellow, anything else is red.
pub fn badge_class_for(status: &str) -> BadgeClass {
    match status.trim().to_ascii_lowercase().as_str() {
        "paid" => BadgeClass::Green,
        "pending" => BadgeClass::Yellow,
        _ => BadgeClass::Red,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub vehicle_type: String,
    pub plate: String,
    pub status_label: String,
    pub badge: BadgeClass,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub amount: String,
}

pub fn project_payment(record: &PaymentRecord, currency_symbol: &str) -> PaymentRow {
    PaymentRow {
        vehicle_type: record.vehicle_type.clone(),
        plate: record.plate.clone(),
        status_label: record.status.label().to_string(),
        badge: badge_class_for(record.status.as_str()),
        date: record.date.format("%Y-%m-%d").to_string(),
        amount: format_amount(record.amount, currency_symbol),
    }
}

/// Collapsible period section with its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodView {
    pub label: String,
    pub total: Amount,
    pub total_display: String,
    pub rows: Vec<PaymentRow>,
}

pub fn project_period(period: &PaymentPeriod, currency_symbol: &str) -> PeriodView {
    let total = period_total(&period.records);
    PeriodView {
        label: period.label.clone(),
        total,
        total_display: format_amount(total, currency_symbol),
        rows: period
            .records
            .iter()
            .map(|record| project_payment(record, currency_symbol))
            .collect(),
    }
}

/// Formats an amount as `<symbol> 1,234,567`.
pub fn format_amount(amount: Amount, currency_symbol: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{currency_symbol} {grouped}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRow {
    pub id: NotificationId,
    pub icon: String,
    pub title: String,
    pub body: String,
    pub time: String,
    pub unread: bool,
    /// `notice` or `notice unread`.
    pub css_class: String,
}

impl NotificationRow {
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.body, self.time)
    }
}

pub fn project_notification(notification: &Notification) -> NotificationRow {
    NotificationRow {
        id: notification.id,
        icon: notification.icon.as_str().to_string(),
        title: notification.title.clone(),
        body: notification.body.clone(),
        time: notification.time.clone(),
        unread: notification.unread,
        css_class: if notification.unread {
            "notice unread".to_string()
        } else {
            "notice".to_string()
        },
    }
}

/// Unread counter shown on sidebar and topbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeView {
    pub count: usize,
    /// Hidden when there is nothing unread.
    pub visible: bool,
}

pub fn project_badge(unread: usize) -> BadgeView {
    BadgeView {
        count: unread,
        visible: unread > 0,
    }
}
