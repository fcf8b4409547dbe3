use std::time::Duration;

use crate::mvi::Intent;

use super::state::NotificationKind;

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationIntent {
    /// Show a message, replacing whatever is visible.
    Display {
        text: String,
        kind: NotificationKind,
        auto_close: Option<Duration>,
    },
    /// User closed the message.
    Dismiss,
    /// Timer fired for the message shown at `generation`.
    AutoClose { generation: u64 },
}

impl NotificationIntent {
    pub fn display(text: impl Into<String>, kind: NotificationKind) -> Self {
        Self::Display {
            text: text.into(),
            kind,
            auto_close: None,
        }
    }
}

impl Intent for NotificationIntent {}
