use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Id, Messages};
use crate::model::Technology;
use crate::store::{Action, AppState, Command, EntityAction, EntityCommand, EntityState};

/// Fixed badge palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Gray,
    Blue,
    Red,
    Green,
    Yellow,
    Indigo,
    Purple,
    Pink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Id,
    pub name: String,
    pub color: TagColor,
    #[serde(default)]
    pub technologies: Vec<Technology>,
}

/// Create and update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagForm {
    pub name: String,
    pub color: TagColor,
}

impl Entity for Tag {
    type Create = TagForm;
    type Update = TagForm;

    const PATH: &'static str = "tags";
    const LIST_KEY: &'static str = "tags";
    const ROUTE: &'static str = "/admin/tags";
    const SEARCH_FIELD: Option<&'static str> = Some("name");
    const MESSAGES: Messages = Messages {
        fetch_list_failed: "Failed to load tags.",
        fetch_one_failed: "Failed to load tag.",
        created: "Tag created successfully!",
        create_failed: "Failed to create tag.",
        updated: "Tag updated successfully!",
        update_failed: "Failed to update tag.",
        deleted: "Tag deleted successfully!",
        delete_failed: "Failed to delete tag.",
        link_add_failed: None,
        link_remove_failed: None,
    };

    fn wrap_action(action: EntityAction<Self>) -> Action {
        Action::Tags(action)
    }

    fn wrap_command(command: EntityCommand<Self>) -> Command {
        Command::Tags(command)
    }

    fn slice(state: &AppState) -> &EntityState<Self> {
        &state.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn color_uses_lowercase_names() {
        let tag: Tag = serde_json::from_value(json!({
            "id": 3,
            "name": "backend",
            "color": "indigo"
        }))
        .unwrap();
        assert_eq!(tag.color, TagColor::Indigo);
        assert!(tag.technologies.is_empty());
    }

    #[test]
    fn unknown_color_is_rejected() {
        let result: Result<Tag, _> =
            serde_json::from_value(json!({ "id": 1, "name": "x", "color": "teal" }));
        assert!(result.is_err());
    }
}
