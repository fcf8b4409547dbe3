//! Per-entity wiring shared by the resource clients and the store slices.
//!
//! Every slice is the same state machine; what differs between users,
//! projects, experiences, technologies and tags is captured here as
//! associated types and constants.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{Action, AppState, Command, EntityAction, EntityCommand, EntityState};

/// Backend primary key.
pub type Id = u64;

/// Direction of a many-to-many relation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOp {
    Add,
    Remove,
}

/// Relation endpoints of an entity that owns a many-to-many association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSpec {
    /// Path segment under the entity path for `LinkOp::Add`.
    pub add_path: &'static str,
    /// Path segment under the entity path for `LinkOp::Remove`.
    pub remove_path: &'static str,
    /// JSON key carrying the owner id (e.g. `projectId`).
    pub owner_field: &'static str,
    /// JSON key carrying the associated id (e.g. `technologyId`).
    pub target_field: &'static str,
}

impl LinkSpec {
    pub fn path(&self, op: LinkOp) -> &'static str {
        match op {
            LinkOp::Add => self.add_path,
            LinkOp::Remove => self.remove_path,
        }
    }
}

/// User-facing notification texts for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub fetch_list_failed: &'static str,
    pub fetch_one_failed: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub updated: &'static str,
    pub update_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
    /// `None` for entities without relations.
    pub link_add_failed: Option<&'static str>,
    pub link_remove_failed: Option<&'static str>,
}

/// A backend record type with its own REST resource and store slice.
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Payload for `POST /{path}`.
    type Create: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Payload for `PUT /{path}/{id}` (full replace).
    type Update: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// REST collection path, without slashes.
    const PATH: &'static str;
    /// Key holding the records in a list response.
    const LIST_KEY: &'static str;
    /// Admin list route the UI returns to after a create.
    const ROUTE: &'static str;
    /// Query parameter used for a search when the caller does not pick one.
    const SEARCH_FIELD: Option<&'static str>;
    /// When false, a list query without a page fetches everything.
    const PAGED_BY_DEFAULT: bool = true;
    /// `GET /{path}/{id}` is served without a bearer token.
    const PUBLIC_DETAIL: bool = false;
    const LINK: Option<LinkSpec> = None;
    const MESSAGES: Messages;

    fn wrap_action(action: EntityAction<Self>) -> Action;

    fn wrap_command(command: EntityCommand<Self>) -> Command;

    /// This entity's slice of the application state.
    fn slice(state: &AppState) -> &EntityState<Self>;
}
