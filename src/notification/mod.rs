//! Single-slot notification channel.
//!
//! One message is visible at a time. Every display bumps a generation
//! counter; auto-close timers carry the generation they were scheduled
//! for, so a timer left over from an older message never hides a newer one.

mod intent;
mod reducer;
mod state;

pub use intent::NotificationIntent;
pub use reducer::NotificationReducer;
pub use state::{NotificationKind, NotificationState, DEFAULT_AUTO_CLOSE};
