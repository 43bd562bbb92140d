//! In-process view target registry.

use crate::projection::DashboardView;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};

/// Any UI surface that renders the dashboard view.
pub trait ViewTarget {
    /// Stable registry id (`[a-z0-9_-]+`).
    fn target_id(&self) -> &str;

    /// Renders one published view. Errors and panics are isolated to this
    /// target.
    fn render(&self, view: &DashboardView) -> Result<(), ViewError>;
}

/// Render failure reported by a view target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    pub message: String,
}

impl ViewError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "view render failed: {}", self.message)
    }
}

impl Error for ViewError {}

/// Target registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRegistryError {
    InvalidTargetId(String),
    DuplicateTargetId(String),
}

impl Display for ViewRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTargetId(value) => write!(f, "view target id is invalid: {value}"),
            Self::DuplicateTargetId(value) => {
                write!(f, "view target id already registered: {value}")
            }
        }
    }
}

impl Error for ViewRegistryError {}

/// Outcome of publishing one view to every registered target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Store revision of the published view.
    pub revision: u64,
    pub rendered: Vec<String>,
    pub failed: Vec<String>,
    /// Targets whose owner dropped them; pruned from the registry.
    pub missing: Vec<String>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.missing.is_empty()
    }
}

/// Registry of view targets.
///
/// Holds weak handles: the UI layer owns its surfaces, and a surface that
/// has been torn down is skipped and pruned on the next publish.
#[derive(Default)]
pub struct ViewRegistry {
    targets: BTreeMap<String, Weak<dyn ViewTarget>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one target under its own id.
    pub fn register(&mut self, target: &Arc<dyn ViewTarget>) -> Result<String, ViewRegistryError> {
        let target_id = target.target_id().trim().to_string();
        if !is_valid_target_id(&target_id) {
            return Err(ViewRegistryError::InvalidTargetId(target_id));
        }
        let live = self
            .targets
            .get(target_id.as_str())
            .is_some_and(|existing| existing.strong_count() > 0);
        if live {
            return Err(ViewRegistryError::DuplicateTargetId(target_id));
        }

        self.targets
            .insert(target_id.clone(), Arc::downgrade(target));
        Ok(target_id)
    }

    /// Removes a target. Returns whether it was registered.
    pub fn unregister(&mut self, target_id: &str) -> bool {
        self.targets.remove(target_id.trim()).is_some()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Returns sorted target ids, including not-yet-pruned dropped ones.
    pub fn target_ids(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }

    /// Pushes `view` to every live target in id order.
    pub fn publish(&mut self, view: &DashboardView) -> PublishReport {
        let mut report = PublishReport {
            revision: view.revision,
            ..PublishReport::default()
        };

        for (target_id, handle) in &self.targets {
            let Some(target) = handle.upgrade() else {
                warn!(
                    "event=view_publish module=sync status=skip reason=missing target={target_id}"
                );
                report.missing.push(target_id.clone());
                continue;
            };
            match render_isolated(target.as_ref(), view) {
                Ok(()) => report.rendered.push(target_id.clone()),
                Err(err) => {
                    warn!(
                        "event=view_publish module=sync status=error target={} revision={} error={}",
                        target_id, view.revision, err
                    );
                    report.failed.push(target_id.clone());
                }
            }
        }

        for target_id in &report.missing {
            self.targets.remove(target_id);
        }
        debug!(
            "event=view_publish module=sync status=ok revision={} rendered={} failed={} missing={}",
            report.revision,
            report.rendered.len(),
            report.failed.len(),
            report.missing.len()
        );
        report
    }

    /// Renders `view` on a single target, used when a target joins late.
    pub fn publish_to(&self, target_id: &str, view: &DashboardView) -> Result<(), ViewError> {
        match self.targets.get(target_id).and_then(Weak::upgrade) {
            Some(target) => render_isolated(target.as_ref(), view),
            None => Err(ViewError::new(format!("target not registered: {target_id}"))),
        }
    }
}

/// Runs one render, turning a panic into a [`ViewError`].
fn render_isolated(target: &dyn ViewTarget, view: &DashboardView) -> Result<(), ViewError> {
    match catch_unwind(AssertUnwindSafe(|| target.render(view))) {
        Ok(result) => result,
        Err(payload) => {
            let reason = panic_payload_to_string(payload.as_ref());
            Err(ViewError::new(format!("target panicked: {reason}")))
        }
    }
}

fn panic_payload_to_string(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn is_valid_target_id(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
