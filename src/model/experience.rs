use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Id, Messages};
use crate::store::{Action, AppState, Command, EntityAction, EntityCommand, EntityState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Freelance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkLocation {
    Remote,
    Onsite,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Id,
    pub title: String,
    pub company: String,
    pub start_date: String,
    /// `None` while the position is ongoing.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: String,
    pub user_id: Id,
    pub employment_type: EmploymentType,
    pub location: WorkLocation,
    #[serde(default)]
    pub company_website: Option<String>,
}

impl Experience {
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceForm {
    pub title: String,
    pub description: String,
    pub user_id: Id,
    pub company: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub employment_type: EmploymentType,
    pub location: WorkLocation,
    pub company_website: Option<String>,
}

impl Entity for Experience {
    type Create = ExperienceForm;
    type Update = ExperienceForm;

    const PATH: &'static str = "experiences";
    const LIST_KEY: &'static str = "experiences";
    const ROUTE: &'static str = "/admin/experiences";
    const SEARCH_FIELD: Option<&'static str> = Some("company");
    const MESSAGES: Messages = Messages {
        fetch_list_failed: "Failed to fetch work experiences.",
        fetch_one_failed: "Failed to load experience.",
        created: "Experience created successfully!",
        create_failed: "Failed to create experience.",
        updated: "Experience updated successfully!",
        update_failed: "Failed to update experience.",
        deleted: "Experience successfully deleted!",
        delete_failed: "Failed to delete experience.",
        link_add_failed: None,
        link_remove_failed: None,
    };

    fn wrap_action(action: EntityAction<Self>) -> Action {
        Action::Experiences(action)
    }

    fn wrap_command(command: EntityCommand<Self>) -> Command {
        Command::Experiences(command)
    }

    fn slice(state: &AppState) -> &EntityState<Self> {
        &state.experiences
    }
}
