//! Canonical domain model for the parking dashboard.
//!
//! # Responsibility
//! - Define the entities owned by the domain store.
//! - Keep per-entity invariants next to the data they constrain.
//!
//! # Invariants
//! - Slot and notification ids are unique inside one snapshot.
//! - A slot carries a plate iff it is not available.
//! - `Notification::unread` only transitions from `true` to `false`.

pub mod activity;
pub mod notification;
pub mod payment;
pub mod slot;
