use std::time::Duration;

use crate::notification::NotificationKind;

use super::action::Command;

/// Delay before leaving a create form for the entity list.
pub const CREATE_REDIRECT_DELAY: Duration = Duration::from_millis(600);
/// Delay before leaving the change-password screen.
pub const PASSWORD_REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Side effect requested by a reducer, executed by the store's runner.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify {
        text: String,
        kind: NotificationKind,
    },
    /// Follow-up request, spawned without awaiting.
    Dispatch(Command),
    Navigate {
        route: String,
        after: Duration,
    },
    ScheduleAutoClose {
        generation: u64,
        after: Duration,
    },
    PersistToken(String),
    ClearToken,
    Reload,
}

impl Effect {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Notify {
            text: text.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Notify {
            text: text.into(),
            kind: NotificationKind::Error,
        }
    }

    pub fn navigate(route: impl Into<String>, after: Duration) -> Self {
        Self::Navigate {
            route: route.into(),
            after,
        }
    }
}
