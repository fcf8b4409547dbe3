use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Id, LinkSpec, Messages};
use crate::model::{Technology, User};
use crate::store::{Action, AppState, Command, EntityAction, EntityCommand, EntityState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub name: String,
    pub description: String,
    /// Cover image URL on the asset host.
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    pub user_id: Id,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub user_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub domain: Option<String>,
    pub repo: Option<String>,
    pub details: Option<String>,
}

impl Entity for Project {
    type Create = ProjectForm;
    type Update = ProjectForm;

    const PATH: &'static str = "projects";
    const LIST_KEY: &'static str = "projects";
    const ROUTE: &'static str = "/admin/projects";
    const SEARCH_FIELD: Option<&'static str> = Some("name");
    const LINK: Option<LinkSpec> = Some(LinkSpec {
        add_path: "add-tech",
        remove_path: "remove-tech",
        owner_field: "projectId",
        target_field: "technologyId",
    });
    const MESSAGES: Messages = Messages {
        fetch_list_failed: "Failed to load projects.",
        fetch_one_failed: "Failed to load project.",
        created: "Project created successfully!",
        create_failed: "Failed to create project.",
        updated: "Project updated successfully!",
        update_failed: "Failed to update project.",
        deleted: "Project successfully deleted!",
        delete_failed: "Failed to delete project.",
        link_add_failed: Some("Failed to add technology to project."),
        link_remove_failed: Some("Failed to remove technology from project."),
    };

    fn wrap_action(action: EntityAction<Self>) -> Action {
        Action::Projects(action)
    }

    fn wrap_command(command: EntityCommand<Self>) -> Command {
        Command::Projects(command)
    }

    fn slice(state: &AppState) -> &EntityState<Self> {
        &state.projects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_sends_nulls_and_omits_missing_cover() {
        let form = ProjectForm {
            name: "Site".into(),
            description: "Portfolio".into(),
            user_id: 1,
            cover: None,
            domain: None,
            repo: Some("https://github.com/me/site".into()),
            details: None,
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Site",
                "description": "Portfolio",
                "userId": 1,
                "domain": null,
                "repo": "https://github.com/me/site",
                "details": null
            })
        );
    }

    #[test]
    fn record_accepts_null_optional_fields() {
        let project: Project = serde_json::from_value(json!({
            "id": 7,
            "name": "p",
            "description": "d",
            "cover": null,
            "domain": null,
            "repo": null,
            "details": null,
            "userId": 1
        }))
        .unwrap();
        assert_eq!(project.cover, None);
        assert_eq!(project.domain, None);
        assert_eq!(project.repo, None);
        assert!(project.technologies.is_empty());
    }
}
