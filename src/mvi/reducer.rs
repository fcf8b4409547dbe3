//! Reducer trait and its output.

use super::intent::Intent;
use super::state::SliceState;
use crate::store::Effect;

/// A reduced state plus the side effects the runner should execute.
#[derive(Debug, Clone, PartialEq)]
pub struct Next<S> {
    pub state: S,
    pub effects: Vec<Effect>,
}

impl<S> Next<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn extend(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be pure: `(State, Intent) -> (State, Effects)`.
pub trait Reducer {
    type State: SliceState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Next<Self::State>;
}
