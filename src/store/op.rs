//! Request lifecycle tracking.

use serde::Serialize;

/// Status of one tracked operation.
///
/// Loading and error are variants of the same value, so a pending
/// operation can never still carry the error of the previous attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum OpState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl OpState {
    /// Folds a request phase into the operation status.
    pub fn track<T>(&mut self, phase: &Phase<T>) {
        *self = match phase {
            Phase::Pending => OpState::Pending,
            Phase::Fulfilled(_) => OpState::Succeeded,
            Phase::Rejected(message) => OpState::Failed(message.clone()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, OpState::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OpState::Succeeded)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            OpState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One phase of a dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}
