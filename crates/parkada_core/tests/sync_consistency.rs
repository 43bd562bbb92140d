use parkada_core::{
    build_dashboard, DashboardConfig, DashboardView, Route, ViewError, ViewTarget,
};
use std::sync::{Arc, Mutex};

struct Surface {
    id: &'static str,
    fail: bool,
    revisions: Mutex<Vec<u64>>,
    last: Mutex<Option<DashboardView>>,
}

impl Surface {
    fn new(id: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id,
            fail: false,
            revisions: Mutex::new(Vec::new()),
            last: Mutex::new(None),
        })
    }

    fn broken(id: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id,
            fail: true,
            revisions: Mutex::new(Vec::new()),
            last: Mutex::new(None),
        })
    }

    fn revisions(&self) -> Vec<u64> {
        self.revisions.lock().unwrap().clone()
    }

    fn last(&self) -> DashboardView {
        self.last.lock().unwrap().clone().unwrap()
    }
}

impl ViewTarget for Surface {
    fn target_id(&self) -> &str {
        self.id
    }

    fn render(&self, view: &DashboardView) -> Result<(), ViewError> {
        if self.fail {
            return Err(ViewError::new("element missing"));
        }
        self.revisions.lock().unwrap().push(view.revision);
        *self.last.lock().unwrap() = Some(view.clone());
        Ok(())
    }
}

fn config() -> DashboardConfig {
    DashboardConfig {
        seed: Some(99),
        ..DashboardConfig::default()
    }
}

#[test]
fn all_targets_follow_the_same_revision_sequence() {
    let mut controller = build_dashboard(&config()).unwrap();
    let surfaces = [
        Surface::new("stats"),
        Surface::new("preview_map"),
        Surface::new("full_map"),
        Surface::new("badge_sidebar"),
        Surface::new("badge_topbar"),
        Surface::new("notifications"),
    ];
    for surface in &surfaces {
        let target: Arc<dyn ViewTarget> = surface.clone();
        controller.attach(&target).unwrap();
    }

    controller.mark_notification_seen(1);
    controller.mark_notification_seen(1);
    controller.navigate(Route::Notifications);

    let expected = surfaces[0].revisions();
    assert_eq!(expected, vec![0, 1, 1, 2]);
    for surface in &surfaces[1..] {
        assert_eq!(surface.revisions(), expected);
        assert_eq!(surface.last(), surfaces[0].last());
    }
    assert_eq!(surfaces[3].last().badge.count, 0);
}

#[test]
fn broken_and_dropped_targets_are_isolated() {
    let mut controller = build_dashboard(&config()).unwrap();
    let healthy = Surface::new("badge_topbar");
    let broken: Arc<dyn ViewTarget> = Surface::broken("activity");
    let healthy_target: Arc<dyn ViewTarget> = healthy.clone();
    controller.attach(&healthy_target).unwrap();
    assert!(controller.attach(&broken).is_err());
    {
        let transient: Arc<dyn ViewTarget> = Surface::new("profile");
        controller.attach(&transient).unwrap();
    }

    let report = controller.mark_all_seen();
    assert_eq!(report.rendered, vec!["badge_topbar"]);
    assert_eq!(report.failed, vec!["activity"]);
    assert_eq!(report.missing, vec!["profile"]);
    assert_eq!(healthy.last().badge.count, 0);
    assert_eq!(
        controller.registry().target_ids(),
        vec!["activity", "badge_topbar"]
    );
}

#[test]
fn detached_target_stops_receiving_views() {
    let mut controller = build_dashboard(&config()).unwrap();
    let surface = Surface::new("full_map");
    let target: Arc<dyn ViewTarget> = surface.clone();
    controller.attach(&target).unwrap();
    assert!(controller.detach("full_map"));

    controller.mark_all_seen();
    assert_eq!(surface.revisions(), vec![0]);
}

#[test]
fn stats_stay_consistent_with_maps() {
    let controller = build_dashboard(&config()).unwrap();
    let view = controller.view();
    let occupied = view
        .full_map
        .iter()
        .filter(|cell| cell.status == parkada_core::SlotStatus::Occupied)
        .count();
    assert_eq!(view.stats.counts.occupied, occupied);
    assert!(view.stats.utilization_pct <= 100);
    assert_eq!(view.preview_map.len(), 24);
}
