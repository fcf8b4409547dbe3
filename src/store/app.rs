//! Root state and reducer.

use serde::Serialize;

use crate::model::{Experience, Project, Tag, Technology, User};
use crate::mvi::{Next, Reducer, SliceState};
use crate::notification::{NotificationReducer, NotificationState};

use super::action::Action;
use super::auth::{AuthReducer, AuthState};
use super::effect::Effect;
use super::entity::{EntityReducer, EntityState};

/// Reduce one slice in place, collecting its effects.
macro_rules! reduce_slice {
    ($state:expr, $effects:expr, $field:ident, $reducer:ty, $intent:expr) => {{
        let next = <$reducer>::reduce(std::mem::take(&mut $state.$field), $intent);
        $state.$field = next.state;
        $effects.extend(next.effects);
    }};
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppState {
    pub auth: AuthState,
    pub users: EntityState<User>,
    pub projects: EntityState<Project>,
    pub experiences: EntityState<Experience>,
    pub technologies: EntityState<Technology>,
    pub tags: EntityState<Tag>,
    pub notification: NotificationState,
}

impl SliceState for AppState {}

pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Intent = Action;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Next<Self::State> {
        let mut effects: Vec<Effect> = Vec::new();
        match intent {
            Action::Auth(a) => reduce_slice!(state, effects, auth, AuthReducer, a),
            Action::Users(a) => reduce_slice!(state, effects, users, EntityReducer<User>, a),
            Action::Projects(a) => {
                reduce_slice!(state, effects, projects, EntityReducer<Project>, a)
            }
            Action::Experiences(a) => {
                reduce_slice!(state, effects, experiences, EntityReducer<Experience>, a)
            }
            Action::Technologies(a) => {
                reduce_slice!(state, effects, technologies, EntityReducer<Technology>, a)
            }
            Action::Tags(a) => reduce_slice!(state, effects, tags, EntityReducer<Tag>, a),
            Action::Notification(i) => {
                reduce_slice!(state, effects, notification, NotificationReducer, i)
            }
        }
        Next::new(state).extend(effects)
    }
}
