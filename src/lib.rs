//! Client-side data synchronization for the portfolio admin API.
//!
//! ```text
//! Command ──→ Dispatcher ──→ Resource Client ──→ HTTP
//!                 │
//!                 ▼
//!  Action ──→ Reducer ──→ (AppState, Effects) ──→ Effect runner
//!                              │                       │
//!                              ▼                       ▼
//!                            View            notifications, follow-ups,
//!                                            delayed navigation, token
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod entity;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod notification;
pub mod session;
pub mod store;

pub use entity::{Entity, Id, LinkOp};
pub use store::{Action, AppState, Command, Effect, Store};
