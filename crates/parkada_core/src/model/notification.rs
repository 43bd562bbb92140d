//! Notification model and its read-state transition.
//!
//! # Invariants
//! - `unread` moves from `true` to `false` only; there is no re-flagging.

use serde::{Deserialize, Deserializer, Serialize};

/// Stable notification identifier.
pub type NotificationId = u32;

/// Icon shown next to a notification row.
///
/// Deserialization never fails on the icon name; unknown names become bell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationIcon {
    Bell,
    Car,
    Calendar,
}

impl NotificationIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bell => "bell",
            Self::Car => "car",
            Self::Calendar => "calendar",
        }
    }

    /// Parses an icon name; unknown names fall back to [`NotificationIcon::Bell`].
    pub fn parse_or_bell(value: &str) -> Self {
        match value.trim() {
            "car" => Self::Car,
            "calendar" => Self::Calendar,
            _ => Self::Bell,
        }
    }
}

impl<'de> Deserialize<'de> for NotificationIcon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_bell(raw.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    /// Free-form relative time, e.g. `1h ago`.
    pub time: String,
    pub unread: bool,
    pub icon: NotificationIcon,
}

impl Notification {
    /// Marks this notification as read.
    ///
    /// Returns `true` only when the state actually changed.
    pub fn mark_seen(&mut self) -> bool {
        let changed = self.unread;
        self.unread = false;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::{Notification, NotificationIcon};

    #[test]
    fn mark_seen_reports_transition_once() {
        let mut notification = Notification {
            id: 9,
            title: "t".to_string(),
            body: "b".to_string(),
            time: "now".to_string(),
            unread: true,
            icon: NotificationIcon::Bell,
        };
        assert!(notification.mark_seen());
        assert!(!notification.unread);
        assert!(!notification.mark_seen());
        assert!(!notification.unread);
    }

    #[test]
    fn unknown_icon_falls_back_to_bell() {
        assert_eq!(NotificationIcon::parse_or_bell("car"), NotificationIcon::Car);
        assert_eq!(
            NotificationIcon::parse_or_bell(" calendar "),
            NotificationIcon::Calendar
        );
        assert_eq!(NotificationIcon::parse_or_bell("rocket"), NotificationIcon::Bell);
        assert_eq!(NotificationIcon::parse_or_bell(""), NotificationIcon::Bell);
    }

    #[test]
    fn deserializes_unknown_icon_as_bell() {
        let notification: Notification = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Gate closed",
            "body": "Gate 2 is closed for maintenance.",
            "time": "Today",
            "unread": true,
            "icon": "rocket"
        }))
        .expect("unknown icon should not reject the notification");
        assert_eq!(notification.icon, NotificationIcon::Bell);

        let car: NotificationIcon =
            serde_json::from_value(serde_json::json!("car")).expect("known icon");
        assert_eq!(car, NotificationIcon::Car);
        assert_eq!(
            serde_json::to_value(NotificationIcon::Calendar).expect("serialize icon"),
            "calendar"
        );
    }
}
