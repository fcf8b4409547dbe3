use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Id, Messages};
use crate::model::{Experience, Project};
use crate::store::{Action, AppState, Command, EntityAction, EntityCommand, EntityState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Available for hire")]
    Hire,
    #[serde(rename = "Available for freelance")]
    Freelance,
    #[serde(rename = "Unavailable")]
    Unavailable,
    #[serde(rename = "Looking")]
    Looking,
    #[serde(rename = "Not looking")]
    NotLooking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub professional_title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub notion_resume: String,
    pub role: UserRole,
    pub availability: Availability,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

/// Profile form, used for both create and edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub professional_title: String,
    pub bio: String,
    pub availability: Availability,
    pub email: String,
    pub phone: String,
    pub github: String,
    pub linkedin: String,
    pub notion_resume: String,
}

impl Entity for User {
    type Create = UserForm;
    type Update = UserForm;

    const PATH: &'static str = "users";
    const LIST_KEY: &'static str = "users";
    const ROUTE: &'static str = "/admin/users";
    const SEARCH_FIELD: Option<&'static str> = None;
    const PUBLIC_DETAIL: bool = true;
    const MESSAGES: Messages = Messages {
        fetch_list_failed: "Failed to load users.",
        fetch_one_failed: "Failed to load user.",
        created: "User created successfully.",
        create_failed: "Failed to create user.",
        updated: "User updated successfully.",
        update_failed: "Failed to update user.",
        deleted: "User deleted successfully.",
        delete_failed: "Failed to delete user.",
        link_add_failed: None,
        link_remove_failed: None,
    };

    fn wrap_action(action: EntityAction<Self>) -> Action {
        Action::Users(action)
    }

    fn wrap_command(command: EntityCommand<Self>) -> Command {
        Command::Users(command)
    }

    fn slice(state: &AppState) -> &EntityState<Self> {
        &state.users
    }
}
