//! View synchronization.
//!
//! # Responsibility
//! - Keep registered view targets consistent with the domain store.
//! - Recompute the full projection set after every mutation.
//!
//! # Invariants
//! - One refresh builds exactly one [`crate::DashboardView`] and every live
//!   target receives that same value.
//! - A failing or dropped target never blocks the others.

pub mod controller;
pub mod view_registry;
