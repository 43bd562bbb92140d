//! In-memory domain store.
//!
//! # Responsibility
//! - Own the canonical slot, activity, payment and notification collections.
//! - Expose the only legal mutations (notification read-state).
//!
//! # Invariants
//! - Snapshots are validated once on construction; invalid data never enters.
//! - Unknown-id mutations are silent no-ops, not errors.
//! - `revision` increments only when a mutation changes state.

use crate::model::activity::ActivityEntry;
use crate::model::notification::{Notification, NotificationId};
use crate::model::payment::PaymentPeriod;
use crate::model::slot::{Slot, SlotId, SlotValidationError};
use crate::source::{EntitySnapshot, EntitySource, SourceError};
use log::{debug, info};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store construction errors.
#[derive(Debug)]
pub enum StoreError {
    Source(SourceError),
    InvalidSlot(SlotValidationError),
    DuplicateSlotId(SlotId),
    DuplicateNotificationId(NotificationId),
    BlankPeriod,
    DuplicatePeriod(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::InvalidSlot(err) => write!(f, "{err}"),
            Self::DuplicateSlotId(id) => write!(f, "duplicate slot id: {id}"),
            Self::DuplicateNotificationId(id) => write!(f, "duplicate notification id: {id}"),
            Self::BlankPeriod => write!(f, "payment period key must not be blank"),
            Self::DuplicatePeriod(label) => write!(f, "duplicate payment period: {label}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::InvalidSlot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SourceError> for StoreError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<SlotValidationError> for StoreError {
    fn from(value: SlotValidationError) -> Self {
        Self::InvalidSlot(value)
    }
}

/// Canonical dashboard state. One instance per dashboard; no global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    slots: Vec<Slot>,
    activities: Vec<ActivityEntry>,
    payments: Vec<PaymentPeriod>,
    notifications: Vec<Notification>,
    revision: u64,
}

impl DomainStore {
    /// Loads a snapshot from `source` and validates it.
    pub fn load(source: &impl EntitySource) -> StoreResult<Self> {
        Self::from_snapshot(source.load()?)
    }

    /// Builds a store from a snapshot.
    ///
    /// # Errors
    /// - Any slot fails [`Slot::validate`].
    /// - Slot, notification or period keys are duplicated.
    /// - A period key is blank.
    pub fn from_snapshot(snapshot: EntitySnapshot) -> StoreResult<Self> {
        validate_snapshot(&snapshot)?;
        info!(
            "event=store_init module=store status=ok slots={} activities={} periods={} notifications={}",
            snapshot.slots.len(),
            snapshot.activities.len(),
            snapshot.payments.len(),
            snapshot.notifications.len()
        );
        Ok(Self {
            slots: snapshot.slots,
            activities: snapshot.activities,
            payments: snapshot.payments,
            notifications: snapshot.notifications,
            revision: 0,
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn activities(&self) -> &[ActivityEntry] {
        &self.activities
    }

    pub fn payments(&self) -> &[PaymentPeriod] {
        &self.payments
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Mutation counter; starts at 0.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Marks one notification read.
    ///
    /// Returns `true` when the notification existed and was unread.
    /// Unknown or already-read ids leave the store untouched.
    pub fn mark_notification_seen(&mut self, id: NotificationId) -> bool {
        let changed = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id)
            .is_some_and(Notification::mark_seen);
        if changed {
            self.revision += 1;
        } else {
            debug!("event=notification_seen module=store status=skip id={id}");
        }
        changed
    }

    /// Marks every notification read. Returns how many transitioned.
    pub fn mark_all_seen(&mut self) -> usize {
        let changed = self
            .notifications
            .iter_mut()
            .map(Notification::mark_seen)
            .filter(|changed| *changed)
            .count();
        if changed > 0 {
            self.revision += 1;
        }
        changed
    }
}

fn validate_snapshot(snapshot: &EntitySnapshot) -> StoreResult<()> {
    let mut slot_ids = BTreeSet::new();
    for slot in &snapshot.slots {
        slot.validate()?;
        if !slot_ids.insert(slot.id) {
            return Err(StoreError::DuplicateSlotId(slot.id));
        }
    }

    let mut notification_ids = BTreeSet::new();
    for notification in &snapshot.notifications {
        if !notification_ids.insert(notification.id) {
            return Err(StoreError::DuplicateNotificationId(notification.id));
        }
    }

    let mut periods = BTreeSet::new();
    for period in &snapshot.payments {
        let label = period.label.trim();
        if label.is_empty() {
            return Err(StoreError::BlankPeriod);
        }
        if !periods.insert(label) {
            return Err(StoreError::DuplicatePeriod(label.to_string()));
        }
    }
    Ok(())
}
