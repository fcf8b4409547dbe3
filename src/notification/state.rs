use std::time::Duration;

use serde::Serialize;

use crate::mvi::SliceState;

pub const DEFAULT_AUTO_CLOSE: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationState {
    pub visible: bool,
    pub text: String,
    pub kind: NotificationKind,
    /// Auto-close delay of the message currently shown.
    #[serde(with = "millis")]
    pub auto_close: Duration,
    pub generation: u64,
    /// Delay used when a display does not pick one.
    #[serde(skip)]
    pub default_auto_close: Duration,
}

impl NotificationState {
    pub fn with_default_auto_close(auto_close: Duration) -> Self {
        Self {
            auto_close,
            default_auto_close: auto_close,
            ..Self::default()
        }
    }
}

impl Default for NotificationState {
    fn default() -> Self {
        Self {
            visible: false,
            text: String::new(),
            kind: NotificationKind::Info,
            auto_close: DEFAULT_AUTO_CLOSE,
            generation: 0,
            default_auto_close: DEFAULT_AUTO_CLOSE,
        }
    }
}

impl SliceState for NotificationState {}

mod millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}
