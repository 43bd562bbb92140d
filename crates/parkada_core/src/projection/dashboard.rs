//! Full dashboard view assembly.

use super::{
    project_activity, project_badge, project_notification, project_period, project_slot,
    project_stats, ActivityRow, BadgeView, NotificationRow, PeriodView, SlotCell, SlotStatsView,
};
use crate::aggregate::{slot_counts, unread_count};
use crate::config::DashboardConfig;
use crate::route::Route;
use crate::store::DomainStore;
use serde::{Deserialize, Serialize};

/// Projection settings taken from [`DashboardConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Number of slot cells on the dashboard map preview.
    pub preview_len: usize,
    pub currency_symbol: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for ViewOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            preview_len: config.preview_len,
            currency_symbol: config.currency_symbol.clone(),
        }
    }
}

/// Every derived value a view target can render, computed from one store
/// revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Store revision this view was derived from.
    pub revision: u64,
    pub route: Route,
    pub stats: SlotStatsView,
    /// Dashboard map preview: the first `preview_len` cells of `full_map`.
    pub preview_map: Vec<SlotCell>,
    pub full_map: Vec<SlotCell>,
    pub activities: Vec<ActivityRow>,
    pub payments: Vec<PeriodView>,
    pub notifications: Vec<NotificationRow>,
    /// Shared by the sidebar and topbar counters.
    pub badge: BadgeView,
}

/// Recomputes the whole dashboard from `store`. No caching.
pub fn project_dashboard(
    store: &DomainStore,
    route: Route,
    options: &ViewOptions,
) -> DashboardView {
    let full_map: Vec<SlotCell> = store.slots().iter().map(project_slot).collect();
    let preview_map = full_map.iter().take(options.preview_len).cloned().collect();

    DashboardView {
        revision: store.revision(),
        route,
        stats: project_stats(slot_counts(store.slots())),
        preview_map,
        full_map,
        activities: store.activities().iter().map(project_activity).collect(),
        payments: store
            .payments()
            .iter()
            .map(|period| project_period(period, options.currency_symbol.as_str()))
            .collect(),
        notifications: store
            .notifications()
            .iter()
            .map(project_notification)
            .collect(),
        badge: project_badge(unread_count(store.notifications())),
    }
}
