//! Centralized store: state, reducers, dispatcher and effect runner.
//!
//! The [`Store`] owns the [`AppState`] behind a mutex. Actions are folded in
//! one at a time through [`AppReducer`]; the effects it returns are executed
//! after the lock is released. Delayed work (auto-close timers, redirects)
//! holds only a weak reference to the store, and is aborted when the store
//! is dropped.

mod action;
mod app;
mod auth;
mod dispatcher;
mod effect;
mod entity;
mod in_flight;
mod navigator;
mod op;
mod scheduler;

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::entity::Entity;
use crate::mvi::Reducer;
use crate::notification::{NotificationIntent, NotificationKind, NotificationState};
use crate::session::{read_token, SessionStorage, TOKEN_KEY};

pub use action::{Action, Command};
pub use app::{AppReducer, AppState};
pub use auth::{
    AuthAction, AuthCommand, AuthReducer, AuthState, PASSWORD_CHANGED, PASSWORD_CHANGE_FAILED,
    RECOVERY_FAILED, RECOVERY_SENT, WRONG_CREDENTIALS,
};
pub use effect::{Effect, CREATE_REDIRECT_DELAY, PASSWORD_REDIRECT_DELAY};
pub use entity::{EntityAction, EntityCommand, EntityReducer, EntityState};
pub use navigator::{LogNavigator, Navigator};
pub use op::{OpState, Phase};

use in_flight::InFlight;
use scheduler::Scheduler;

const ACTION_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("store must be created inside a Tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Application store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

pub(crate) struct Inner {
    state: Mutex<AppState>,
    api: ApiClient,
    session: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    scheduler: Scheduler,
    actions: broadcast::Sender<Action>,
    in_flight: InFlight,
    runtime: Handle,
}

impl Store {
    /// Builds the store and seeds the auth slice from session storage.
    ///
    /// Must be called from within a Tokio runtime; timers and follow-up
    /// dispatches are spawned on it.
    pub fn new(
        config: &Config,
        session: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, StoreError> {
        let runtime = Handle::try_current()?;
        let api = ApiClient::new(config, Arc::clone(&session))?;

        let state = AppState {
            auth: AuthState::with_token(read_token(session.as_ref())),
            notification: NotificationState::with_default_auto_close(
                config.notifications.auto_close(),
            ),
            ..AppState::default()
        };
        let (actions, _) = broadcast::channel(ACTION_CHANNEL_CAPACITY);

        Ok(Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                api,
                session,
                navigator,
                scheduler: Scheduler::default(),
                actions,
                in_flight: InFlight::default(),
                runtime,
            }),
        })
    }

    /// Snapshot of the whole state.
    pub fn state(&self) -> AppState {
        self.inner.state.lock().clone()
    }

    /// Reads part of the state without cloning all of it.
    pub fn select<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&*self.inner.state.lock())
    }

    /// Snapshot of one entity slice.
    pub fn slice<E: Entity>(&self) -> EntityState<E> {
        self.select(|state| E::slice(state).clone())
    }

    /// Stream of every action applied from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Action> {
        self.inner.actions.subscribe()
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Folds one action into the state and runs its effects.
    pub fn apply(&self, action: Action) {
        self.inner.apply(action);
    }

    /// Runs one command to completion. Failures end up in the state and the
    /// notification channel, never in the return value.
    pub async fn dispatch(&self, command: impl Into<Command>) {
        let _guard = self.inner.in_flight.enter();
        Arc::clone(&self.inner).run(command.into()).await;
    }

    /// Waits until no dispatch, including spawned follow-ups, is running.
    /// Scheduled timers are not waited for.
    pub async fn settle(&self) {
        self.inner.in_flight.idle().await;
    }

    pub fn notify(&self, text: impl Into<String>, kind: NotificationKind) {
        self.apply(NotificationIntent::display(text, kind).into());
    }

    pub fn notify_for(&self, text: impl Into<String>, kind: NotificationKind, auto_close: Duration) {
        self.apply(
            NotificationIntent::Display {
                text: text.into(),
                kind,
                auto_close: Some(auto_close),
            }
            .into(),
        );
    }

    pub fn dismiss_notification(&self) {
        self.apply(NotificationIntent::Dismiss.into());
    }

    /// Clears the token, resets the auth slice and asks for a reload.
    pub fn logout(&self) {
        self.apply(AuthAction::LoggedOut.into());
    }

    /// Aborts redirects that have not fired yet.
    pub fn cancel_scheduled(&self) {
        self.inner.scheduler.cancel_navigations();
    }

    pub fn pending_navigations(&self) -> usize {
        self.inner.scheduler.pending_navigations()
    }
}

impl Inner {
    pub(crate) fn apply(self: &Arc<Self>, action: Action) {
        let effects = {
            let mut state = self.state.lock();
            let next = AppReducer::reduce(std::mem::take(&mut *state), action.clone());
            *state = next.state;
            next.effects
        };
        // No receivers is fine.
        let _ = self.actions.send(action);

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(self: &Arc<Self>, effect: Effect) {
        debug!(?effect, "effect");
        match effect {
            Effect::Notify { text, kind } => {
                self.apply(NotificationIntent::display(text, kind).into());
            }

            Effect::Dispatch(command) => {
                let guard = self.in_flight.enter();
                let inner = Arc::clone(self);
                self.runtime.spawn(async move {
                    inner.run(command).await;
                    drop(guard);
                });
            }

            Effect::Navigate { route, after } => {
                let weak = Arc::downgrade(self);
                let task = self.runtime.spawn(async move {
                    tokio::time::sleep(after).await;
                    if let Some(inner) = weak.upgrade() {
                        inner.navigator.navigate(&route);
                    }
                });
                self.scheduler.add_navigation(task.abort_handle());
            }

            Effect::ScheduleAutoClose { generation, after } => {
                let weak: Weak<Inner> = Arc::downgrade(self);
                let task = self.runtime.spawn(async move {
                    tokio::time::sleep(after).await;
                    if let Some(inner) = weak.upgrade() {
                        inner.apply(NotificationIntent::AutoClose { generation }.into());
                    }
                });
                self.scheduler
                    .replace_auto_close(generation, task.abort_handle());
            }

            Effect::PersistToken(token) => {
                if let Err(e) = self.session.set(TOKEN_KEY, &token) {
                    warn!(error = %e, "failed to persist token");
                }
            }

            Effect::ClearToken => {
                if let Err(e) = self.session.remove(TOKEN_KEY) {
                    warn!(error = %e, "failed to clear token");
                }
            }

            Effect::Reload => self.navigator.reload(),
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.scheduler.cancel_all();
    }
}
