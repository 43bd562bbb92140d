//! Recent-activity log entries.

use serde::{Deserialize, Serialize};

/// Kind of gate/reservation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Enter,
    Exit,
    Reserve,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Exit => "exit",
            Self::Reserve => "reserve",
        }
    }
}

/// One immutable activity line. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub text: String,
    /// Free-form display time, e.g. `08:15 AM`.
    pub time: String,
}

impl ActivityEntry {
    pub fn new(kind: ActivityKind, text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            time: time.into(),
        }
    }
}
