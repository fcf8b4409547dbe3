//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are either request phases reported by the dispatcher
/// or events raised by the user and by timers.
pub trait Intent: Send + 'static {}
