//! Substring highlighting over a published dashboard view.
//!
//! # Invariants
//! - Matching is case-insensitive and whitespace-normalized.
//! - A blank query highlights nothing.
//! - Result ids keep view order.

use crate::model::notification::NotificationId;
use crate::model::slot::SlotId;
use crate::projection::DashboardView;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Items to highlight for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHighlights {
    /// Normalized query; empty when nothing is highlighted.
    pub query: String,
    pub slot_ids: Vec<SlotId>,
    pub notification_ids: Vec<NotificationId>,
}

impl SearchHighlights {
    pub fn is_empty(&self) -> bool {
        self.slot_ids.is_empty() && self.notification_ids.is_empty()
    }
}

/// Trims, collapses inner whitespace and lowercases a query.
pub fn normalize_query(raw: &str) -> String {
    WHITESPACE_RE
        .replace_all(raw.trim(), " ")
        .to_lowercase()
}

/// Computes highlights for `raw_query` over `view`.
pub fn highlight(view: &DashboardView, raw_query: &str) -> SearchHighlights {
    let query = normalize_query(raw_query);
    if query.is_empty() {
        return SearchHighlights::default();
    }

    let slot_ids = view
        .full_map
        .iter()
        .filter(|cell| matches(&cell.search_text(), &query))
        .map(|cell| cell.slot_id)
        .collect();
    let notification_ids = view
        .notifications
        .iter()
        .filter(|row| matches(&row.search_text(), &query))
        .map(|row| row.id)
        .collect();

    SearchHighlights {
        query,
        slot_ids,
        notification_ids,
    }
}

fn matches(text: &str, normalized_query: &str) -> bool {
    normalize_query(text).contains(normalized_query)
}
