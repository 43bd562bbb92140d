//! Pure statistics derived from a store snapshot.
//!
//! # Invariants
//! - `available + occupied + reserved == total` for every [`SlotCounts`].
//! - Percentages are integers in `0..=100` for `part <= total`, and `0` for
//!   an empty total.
//! - Ties round half away from zero.

use crate::model::notification::Notification;
use crate::model::payment::{Amount, PaymentRecord};
use crate::model::slot::{Slot, SlotStatus};
use serde::{Deserialize, Serialize};

/// Slot totals by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCounts {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub reserved: usize,
}

impl SlotCounts {
    pub fn of(&self, status: SlotStatus) -> usize {
        match status {
            SlotStatus::Available => self.available,
            SlotStatus::Occupied => self.occupied,
            SlotStatus::Reserved => self.reserved,
        }
    }
}

pub fn slot_counts(slots: &[Slot]) -> SlotCounts {
    slots.iter().fold(
        SlotCounts {
            total: slots.len(),
            ..SlotCounts::default()
        },
        |mut counts, slot| {
            match slot.status {
                SlotStatus::Available => counts.available += 1,
                SlotStatus::Occupied => counts.occupied += 1,
                SlotStatus::Reserved => counts.reserved += 1,
            }
            counts
        },
    )
}

/// Share of slots holding a vehicle (occupied or reserved).
pub fn utilization(counts: &SlotCounts) -> u32 {
    percentage_of(counts.occupied + counts.reserved, counts.total)
}

/// `round(100 * part / total)`, or `0` when `total == 0`.
///
/// Exact integer arithmetic: `(200 * part + total) / (2 * total)` is
/// round-half-up, which equals half-away-from-zero for unsigned inputs.
pub fn percentage_of(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let part = part as u128;
    let total = total as u128;
    let rounded = (200 * part + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Sums a period's amounts, saturating at `Amount::MAX`.
pub fn period_total(records: &[PaymentRecord]) -> Amount {
    records
        .iter()
        .fold(0, |total: Amount, record| total.saturating_add(record.amount))
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications
        .iter()
        .filter(|notification| notification.unread)
        .count()
}
