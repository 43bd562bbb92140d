//! Sync controller: the single entry point for UI events.
//!
//! # Invariants
//! - Every mutating entry point refreshes all targets before returning.
//! - The store is never observable through a view older than the latest
//!   mutation once the entry point returns.

use crate::model::notification::NotificationId;
use crate::projection::{project_dashboard, DashboardView, ViewOptions};
use crate::route::Route;
use crate::search::{highlight, SearchHighlights};
use crate::store::DomainStore;
use crate::sync::view_registry::{
    PublishReport, ViewError, ViewRegistry, ViewRegistryError, ViewTarget,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Owns the store and keeps every registered view target in step with it.
pub struct SyncController {
    store: DomainStore,
    registry: ViewRegistry,
    route: Route,
    options: ViewOptions,
    last_view: DashboardView,
}

impl SyncController {
    pub fn new(store: DomainStore, options: ViewOptions) -> Self {
        let route = Route::default();
        let last_view = project_dashboard(&store, route, &options);
        Self {
            store,
            registry: ViewRegistry::new(),
            route,
            options,
            last_view,
        }
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Last published view.
    pub fn view(&self) -> &DashboardView {
        &self.last_view
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Registers a target and renders the current view on it right away.
    ///
    /// A render failure here is returned but keeps the registration.
    pub fn attach(&mut self, target: &Arc<dyn ViewTarget>) -> Result<(), AttachError> {
        let target_id = self
            .registry
            .register(target)
            .map_err(AttachError::Registry)?;
        self.registry
            .publish_to(target_id.as_str(), &self.last_view)
            .map_err(AttachError::InitialRender)
    }

    pub fn detach(&mut self, target_id: &str) -> bool {
        self.registry.unregister(target_id)
    }

    /// Recomputes every projection and publishes it to all targets.
    pub fn refresh(&mut self) -> PublishReport {
        self.last_view = project_dashboard(&self.store, self.route, &self.options);
        self.registry.publish(&self.last_view)
    }

    /// Marks one notification read (unknown ids are ignored), then refreshes.
    pub fn mark_notification_seen(&mut self, id: NotificationId) -> PublishReport {
        self.store.mark_notification_seen(id);
        self.refresh()
    }

    /// Marks all notifications read, then refreshes.
    pub fn mark_all_seen(&mut self) -> PublishReport {
        let changed = self.store.mark_all_seen();
        info!("event=mark_all_seen module=sync status=ok changed={changed}");
        self.refresh()
    }

    /// Switches page; opening notifications clears unread state.
    pub fn navigate(&mut self, route: Route) -> PublishReport {
        self.route = route;
        if route.marks_notifications_seen() {
            self.store.mark_all_seen();
        }
        info!("event=navigate module=sync status=ok route={route}");
        self.refresh()
    }

    /// Highlights for a search query against the last published view.
    pub fn search(&self, query: &str) -> SearchHighlights {
        highlight(&self.last_view, query)
    }
}

/// Errors from [`SyncController::attach`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachError {
    Registry(ViewRegistryError),
    InitialRender(ViewError),
}

impl Display for AttachError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::InitialRender(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AttachError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            Self::InitialRender(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttachError, SyncController};
    use crate::projection::{DashboardView, ViewOptions};
    use crate::route::Route;
    use crate::source::SampleEntitySource;
    use crate::store::DomainStore;
    use crate::sync::view_registry::{ViewError, ViewTarget};
    use std::sync::{Arc, Mutex};

    struct Capture {
        target_id: &'static str,
        views: Mutex<Vec<DashboardView>>,
    }

    impl Capture {
        fn new(target_id: &'static str) -> Arc<Self> {
            Arc::new(Self {
                target_id,
                views: Mutex::new(Vec::new()),
            })
        }

        fn last(&self) -> DashboardView {
            self.views
                .lock()
                .expect("views lock")
                .last()
                .cloned()
                .expect("at least one render")
        }

        fn renders(&self) -> usize {
            self.views.lock().expect("views lock").len()
        }
    }

    impl ViewTarget for Capture {
        fn target_id(&self) -> &str {
            self.target_id
        }

        fn render(&self, view: &DashboardView) -> Result<(), ViewError> {
            self.views.lock().expect("views lock").push(view.clone());
            Ok(())
        }
    }

    fn controller() -> SyncController {
        let source = SampleEntitySource::seeded(48, 11).expect("source");
        SyncController::new(
            DomainStore::load(&source).expect("store"),
            ViewOptions::default(),
        )
    }

    fn attach(controller: &mut SyncController, capture: &Arc<Capture>) {
        let target: Arc<dyn ViewTarget> = capture.clone();
        controller.attach(&target).expect("attach");
    }

    #[test]
    fn attach_renders_current_view_immediately() {
        let mut controller = controller();
        let badge = Capture::new("badge");
        attach(&mut controller, &badge);
        assert_eq!(badge.renders(), 1);
        assert_eq!(badge.last().badge.count, 2);
    }

    #[test]
    fn attach_rejects_duplicate_id() {
        let mut controller = controller();
        let first = Capture::new("badge");
        attach(&mut controller, &first);
        let second: Arc<dyn ViewTarget> = Capture::new("badge");
        assert!(matches!(
            controller.attach(&second),
            Err(AttachError::Registry(_))
        ));
    }

    #[test]
    fn every_target_sees_the_same_revision() {
        let mut controller = controller();
        let badge = Capture::new("badge");
        let list = Capture::new("notifications");
        attach(&mut controller, &badge);
        attach(&mut controller, &list);

        let report = controller.mark_notification_seen(2);
        assert!(report.is_clean());
        assert_eq!(report.revision, 1);
        assert_eq!(badge.last(), list.last());
        assert_eq!(badge.last().badge.count, 1);
        let row = list
            .last()
            .notifications
            .into_iter()
            .find(|row| row.id == 2)
            .expect("row 2");
        assert!(!row.unread);
    }

    #[test]
    fn unknown_id_still_republishes_unchanged_view() {
        let mut controller = controller();
        let badge = Capture::new("badge");
        attach(&mut controller, &badge);
        let before = controller.store().notifications().to_vec();

        let report = controller.mark_notification_seen(404);
        assert_eq!(report.revision, 0);
        assert_eq!(controller.store().notifications(), &before[..]);
        assert_eq!(badge.renders(), 2);
        assert_eq!(badge.last().badge.count, 2);
    }

    #[test]
    fn navigating_to_notifications_clears_badges() {
        let mut controller = controller();
        let badge = Capture::new("badge");
        attach(&mut controller, &badge);

        controller.navigate(Route::Payments);
        assert_eq!(badge.last().route, Route::Payments);
        assert_eq!(badge.last().badge.count, 2);

        controller.navigate(Route::Notifications);
        let view = badge.last();
        assert_eq!(view.route, Route::Notifications);
        assert_eq!(view.badge.count, 0);
        assert!(!view.badge.visible);
        assert!(view.notifications.iter().all(|row| !row.unread));
    }

    #[test]
    fn mark_all_seen_is_idempotent() {
        let mut controller = controller();
        controller.mark_all_seen();
        let once = controller.store().notifications().to_vec();
        let report = controller.mark_all_seen();
        assert_eq!(controller.store().notifications(), &once[..]);
        assert_eq!(report.revision, 1);
        assert_eq!(controller.view().badge.count, 0);
    }

    #[test]
    fn search_uses_last_published_view() {
        let controller = controller();
        let hits = controller.search("reminder");
        assert_eq!(hits.notification_ids, vec![1]);
    }
}
