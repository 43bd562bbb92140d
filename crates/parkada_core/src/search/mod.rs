//! Search-as-you-type highlighting.
//!
//! # Responsibility
//! - Match a free-text query against the rendered slot and notification text.
//! - Keep query normalization inside core so every UI behaves the same.

pub mod highlight;

pub use highlight::{highlight, normalize_query, SearchHighlights};
