//! Parking slot model.
//!
//! # Responsibility
//! - Define the slot record rendered by both map views.
//! - Derive the human label (`A-05`) from section and id.
//!
//! # Invariants
//! - `id` is non-zero.
//! - `plate` is empty iff `status == SlotStatus::Available`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable slot identifier, 1-based.
pub type SlotId = u32;

/// Occupancy state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Occupied,
    Reserved,
}

impl SlotStatus {
    /// All statuses in display order.
    pub const ALL: [SlotStatus; 3] = [Self::Available, Self::Occupied, Self::Reserved];

    /// Stable lowercase id, also used as the view `data-status` value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Reserved => "reserved",
        }
    }

    /// Whether a vehicle is attached to a slot in this state.
    pub fn holds_vehicle(self) -> bool {
        !matches!(self, Self::Available)
    }
}

impl Display for SlotStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parking space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub section: String,
    /// Derived from `section` and `id`, e.g. `A-05`.
    pub label: String,
    pub status: SlotStatus,
    /// Empty when the slot is available.
    pub plate: String,
    pub since: NaiveTime,
}

impl Slot {
    /// Builds a slot and derives its label.
    ///
    /// Does not validate; see [`Slot::validate`].
    pub fn new(
        id: SlotId,
        section: impl Into<String>,
        status: SlotStatus,
        plate: impl Into<String>,
        since: NaiveTime,
    ) -> Self {
        let section = section.into();
        Self {
            label: slot_label(section.as_str(), id),
            id,
            section,
            status,
            plate: plate.into(),
            since,
        }
    }

    /// Checks slot-local invariants.
    pub fn validate(&self) -> Result<(), SlotValidationError> {
        if self.id == 0 {
            return Err(SlotValidationError::ZeroId);
        }
        if self.section.trim().is_empty() {
            return Err(SlotValidationError::BlankSection(self.id));
        }
        let has_plate = !self.plate.trim().is_empty();
        if has_plate != self.status.holds_vehicle() {
            return Err(SlotValidationError::PlateStatusMismatch {
                id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }
}

/// Formats the display label for a slot (`<section>-<id:02>`).
pub fn slot_label(section: &str, id: SlotId) -> String {
    format!("{section}-{id:02}")
}

/// Slot invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValidationError {
    ZeroId,
    BlankSection(SlotId),
    PlateStatusMismatch { id: SlotId, status: SlotStatus },
}

impl Display for SlotValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroId => write!(f, "slot id must be >= 1"),
            Self::BlankSection(id) => write!(f, "slot {id} has a blank section"),
            Self::PlateStatusMismatch { id, status } => write!(
                f,
                "slot {id} is `{status}`; plate must be set iff the slot is not available"
            ),
        }
    }
}

impl Error for SlotValidationError {}
