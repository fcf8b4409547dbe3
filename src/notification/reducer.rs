use std::time::Duration;

use crate::mvi::{Next, Reducer};
use crate::store::Effect;

use super::intent::NotificationIntent;
use super::state::{NotificationKind, NotificationState};

/// Clears the slot back to an empty info message, keeping the counters.
fn hidden(state: NotificationState) -> NotificationState {
    NotificationState {
        visible: false,
        text: String::new(),
        kind: NotificationKind::Info,
        ..state
    }
}

pub struct NotificationReducer;

impl Reducer for NotificationReducer {
    type State = NotificationState;
    type Intent = NotificationIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Next<Self::State> {
        match intent {
            NotificationIntent::Display {
                text,
                kind,
                auto_close,
            } => {
                let generation = state.generation.wrapping_add(1);
                // Zero means "use the default", not "close at once".
                let after = auto_close
                    .filter(|d| *d > Duration::ZERO)
                    .unwrap_or(state.default_auto_close);
                Next::new(NotificationState {
                    visible: true,
                    text,
                    kind,
                    auto_close: after,
                    generation,
                    ..state
                })
                .with(Effect::ScheduleAutoClose { generation, after })
            }

            NotificationIntent::Dismiss => Next::new(hidden(state)),

            NotificationIntent::AutoClose { generation } if generation == state.generation => {
                Next::new(hidden(state))
            }

            // Stale timer from a replaced message.
            NotificationIntent::AutoClose { .. } => Next::new(state),
        }
    }
}
