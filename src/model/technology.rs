use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Id, LinkSpec, Messages};
use crate::model::Tag;
use crate::store::{Action, AppState, Command, EntityAction, EntityCommand, EntityState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyForm {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Entity for Technology {
    type Create = TechnologyForm;
    type Update = TechnologyForm;

    const PATH: &'static str = "technologies";
    const LIST_KEY: &'static str = "technologies";
    const ROUTE: &'static str = "/admin/technologies";
    const SEARCH_FIELD: Option<&'static str> = Some("name");
    const PAGED_BY_DEFAULT: bool = false;
    const LINK: Option<LinkSpec> = Some(LinkSpec {
        add_path: "add-tag",
        remove_path: "remove-tag",
        owner_field: "technologyId",
        target_field: "tagId",
    });
    const MESSAGES: Messages = Messages {
        fetch_list_failed: "Failed to fetch technologies.",
        fetch_one_failed: "Failed to fetch technology.",
        created: "Technology created successfully!",
        create_failed: "Failed to create technology.",
        updated: "Technology updated successfully!",
        update_failed: "Failed to update technology.",
        deleted: "Technology successfully deleted!",
        delete_failed: "Failed to delete technology.",
        link_add_failed: Some("Failed to add tag to technology."),
        link_remove_failed: Some("Failed to remove tag from technology."),
    };

    fn wrap_action(action: EntityAction<Self>) -> Action {
        Action::Technologies(action)
    }

    fn wrap_command(command: EntityCommand<Self>) -> Command {
        Command::Technologies(command)
    }

    fn slice(state: &AppState) -> &EntityState<Self> {
        &state.technologies
    }
}
