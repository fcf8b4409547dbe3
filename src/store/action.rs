use crate::entity::Entity;
use crate::model::{Experience, Project, Tag, Technology, User};
use crate::mvi::Intent;
use crate::notification::NotificationIntent;

use super::auth::{AuthAction, AuthCommand};
use super::entity::{EntityAction, EntityCommand};

/// Everything the root reducer can fold into [`AppState`](super::AppState).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Users(EntityAction<User>),
    Projects(EntityAction<Project>),
    Experiences(EntityAction<Experience>),
    Technologies(EntityAction<Technology>),
    Tags(EntityAction<Tag>),
    Notification(NotificationIntent),
}

impl Intent for Action {}

impl From<NotificationIntent> for Action {
    fn from(intent: NotificationIntent) -> Self {
        Action::Notification(intent)
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

/// A request the dispatcher knows how to run.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Auth(AuthCommand),
    Users(EntityCommand<User>),
    Projects(EntityCommand<Project>),
    Experiences(EntityCommand<Experience>),
    Technologies(EntityCommand<Technology>),
    Tags(EntityCommand<Tag>),
}

impl Command {
    /// Resource and operation, for log fields.
    pub fn label(&self) -> (&'static str, &'static str) {
        match self {
            Command::Auth(AuthCommand::Login { .. }) => ("auth", "login"),
            Command::Auth(AuthCommand::Recover { .. }) => ("auth", "recover"),
            Command::Auth(AuthCommand::ChangePassword { .. }) => ("auth", "change_password"),
            Command::Users(c) => entity_label(c),
            Command::Projects(c) => entity_label(c),
            Command::Experiences(c) => entity_label(c),
            Command::Technologies(c) => entity_label(c),
            Command::Tags(c) => entity_label(c),
        }
    }
}

fn entity_label<E: Entity>(command: &EntityCommand<E>) -> (&'static str, &'static str) {
    let op = match command {
        EntityCommand::FetchList(_) => "fetch_list",
        EntityCommand::FetchOne(_) => "fetch_one",
        EntityCommand::Create(_) => "create",
        EntityCommand::Update { .. } => "update",
        EntityCommand::Delete(_) => "delete",
        EntityCommand::Link { .. } => "link",
    };
    (E::PATH, op)
}
