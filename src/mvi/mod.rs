//! Model-View-Intent primitives for the store.
//!
//! ```text
//! Intent ──→ Reducer ──→ Next { State, Effects }
//!    ↑                          │
//!    └──── effect runner ◄──────┘
//! ```
//!
//! - **State**: plain data, snapshotted by consumers
//! - **Intent**: a completed request phase or a user/timer event
//! - **Reducer**: pure function; side effects are returned as values

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::{Next, Reducer};
pub use state::SliceState;
