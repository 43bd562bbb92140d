//! Core view-model logic for the Parkada campus parking dashboard.
//! This crate owns the domain store and every value a UI surface renders.

pub mod aggregate;
pub mod config;
pub mod logging;
pub mod model;
pub mod projection;
pub mod route;
pub mod search;
pub mod session;
pub mod source;
pub mod store;
pub mod sync;

pub use aggregate::{
    percentage_of, period_total, slot_counts, unread_count, utilization, SlotCounts,
};
pub use config::{ConfigError, DashboardConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::activity::{ActivityEntry, ActivityKind};
pub use model::notification::{Notification, NotificationIcon, NotificationId};
pub use model::payment::{Amount, PaymentPeriod, PaymentRecord, PaymentStatus};
pub use model::slot::{Slot, SlotId, SlotStatus, SlotValidationError};
pub use projection::{
    badge_class_for, format_amount, project_dashboard, BadgeClass, BadgeView, DashboardView,
    NotificationRow, PaymentRow, PeriodView, SlotCell, SlotStatsView, ViewOptions,
};
pub use route::{parse_route, Route, RouteError};
pub use search::{highlight, SearchHighlights};
pub use session::avatar::{AvatarError, AvatarReader, AvatarState, FsAvatarReader};
pub use session::profile::{
    resolve_profile_card, IdentityProvider, ProfileCard, ProfileDirectory, ProfileError,
    SessionUser, UserProfile,
};
pub use session::LogoutNotice;
pub use source::{EntitySnapshot, EntitySource, SampleEntitySource, SourceError, SourceResult};
pub use store::{DomainStore, StoreError, StoreResult};
pub use sync::controller::{AttachError, SyncController};
pub use sync::view_registry::{PublishReport, ViewError, ViewRegistry, ViewRegistryError, ViewTarget};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Builds a controller from config using the sample entity source.
///
/// # Errors
/// Returns [`StoreError`] when the config is invalid or the snapshot breaks
/// a store invariant.
pub fn build_dashboard(config: &DashboardConfig) -> StoreResult<SyncController> {
    let source = SampleEntitySource::from_config(config)?;
    let store = DomainStore::load(&source)?;
    Ok(SyncController::new(store, ViewOptions::from(config)))
}
