//! Authentication slice.

use serde::Serialize;

use crate::mvi::{Intent, Next, Reducer, SliceState};

use super::action::Command;
use super::effect::{Effect, PASSWORD_REDIRECT_DELAY};
use super::op::{OpState, Phase};

pub const WRONG_CREDENTIALS: &str = "Error: wrong credentials.";
pub const RECOVERY_SENT: &str = "Email sent successfully!";
pub const RECOVERY_FAILED: &str = "Failed to send recovery email.";
pub const PASSWORD_CHANGED: &str = "Password changed successfully!";
pub const PASSWORD_CHANGE_FAILED: &str = "Failed to change password.";

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AuthState {
    pub token: Option<String>,
    pub login: OpState,
    pub recover: OpState,
    pub change_password: OpState,
}

impl AuthState {
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub fn loading(&self) -> bool {
        self.login.is_loading() || self.recover.is_loading() || self.change_password.is_loading()
    }

    /// Recovery email was accepted by the backend.
    pub fn sent(&self) -> bool {
        self.recover.is_success()
    }

    pub fn changed(&self) -> bool {
        self.change_password.is_success()
    }
}

impl SliceState for AuthState {}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    /// Fulfilled with the token from the login response, if any.
    Login(Phase<Option<String>>),
    Recover(Phase<()>),
    ChangePassword(Phase<()>),
    LoggedOut,
}

impl Intent for AuthAction {}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthCommand {
    Login { email: String, password: String },
    Recover { email: String },
    /// `token` is the one-time token from the recovery email.
    ChangePassword { token: String, password: String },
}

impl From<AuthCommand> for Command {
    fn from(command: AuthCommand) -> Self {
        Command::Auth(command)
    }
}

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Intent = AuthAction;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Next<Self::State> {
        match intent {
            AuthAction::Login(phase) => {
                state.login.track(&phase);
                match phase {
                    Phase::Pending => Next::new(state),
                    Phase::Fulfilled(Some(token)) => {
                        state.token = Some(token.clone());
                        Next::new(state).with(Effect::PersistToken(token))
                    }
                    Phase::Fulfilled(None) => {
                        state.token = None;
                        Next::new(state)
                    }
                    Phase::Rejected(_) => {
                        state.token = None;
                        Next::new(state).extend([Effect::ClearToken, Effect::error(WRONG_CREDENTIALS)])
                    }
                }
            }

            AuthAction::Recover(phase) => {
                state.recover.track(&phase);
                match phase {
                    Phase::Pending => Next::new(state),
                    Phase::Fulfilled(()) => Next::new(state).with(Effect::success(RECOVERY_SENT)),
                    Phase::Rejected(_) => Next::new(state).with(Effect::error(RECOVERY_FAILED)),
                }
            }

            AuthAction::ChangePassword(phase) => {
                state.change_password.track(&phase);
                match phase {
                    Phase::Pending => Next::new(state),
                    Phase::Fulfilled(()) => Next::new(state).extend([
                        Effect::success(PASSWORD_CHANGED),
                        Effect::navigate("/", PASSWORD_REDIRECT_DELAY),
                    ]),
                    Phase::Rejected(_) => {
                        Next::new(state).with(Effect::error(PASSWORD_CHANGE_FAILED))
                    }
                }
            }

            AuthAction::LoggedOut => {
                Next::new(AuthState::default()).extend([Effect::ClearToken, Effect::Reload])
            }
        }
    }
}
