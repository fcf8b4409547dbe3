//! Generic entity slice: one state machine shared by every resource.

use std::marker::PhantomData;

use serde::Serialize;

use crate::api::ListQuery;
use crate::entity::{Entity, Id, LinkOp};
use crate::model::Page;
use crate::mvi::{Intent, Next, Reducer, SliceState};

use super::action::Command;
use super::effect::{Effect, CREATE_REDIRECT_DELAY};
use super::op::{OpState, Phase};

/// Cached view of one entity type.
///
/// `list` and `detail` are fetched independently and are not reconciled:
/// updating a record refreshes `detail` but leaves `list` as it was until
/// the follow-up list fetch lands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "E: Serialize")]
pub struct EntityState<E> {
    pub list: Vec<E>,
    pub total_pages: u32,
    pub detail: Option<E>,
    pub fetch_list: OpState,
    pub fetch_one: OpState,
    pub create: OpState,
    pub update: OpState,
    pub delete: OpState,
    pub link: OpState,
}

impl<E> Default for EntityState<E> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            total_pages: 1,
            detail: None,
            fetch_list: OpState::Idle,
            fetch_one: OpState::Idle,
            create: OpState::Idle,
            update: OpState::Idle,
            delete: OpState::Idle,
            link: OpState::Idle,
        }
    }
}

impl<E: Entity> SliceState for EntityState<E> {}

/// Request phases reported for one entity type.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityAction<E: Entity> {
    FetchList(Phase<Page<E>>),
    FetchOne(Phase<E>),
    Create(Phase<E>),
    Update(Phase<E>),
    /// Carries the deleted id.
    Delete(Phase<Id>),
    /// Carries the owner id.
    Link { op: LinkOp, phase: Phase<Id> },
}

impl<E: Entity> Intent for EntityAction<E> {}

/// Requests that can be dispatched for one entity type.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityCommand<E: Entity> {
    FetchList(ListQuery),
    FetchOne(Id),
    Create(E::Create),
    Update { id: Id, data: E::Update },
    Delete(Id),
    Link { op: LinkOp, owner: Id, target: Id },
}

impl<E: Entity> EntityCommand<E> {
    /// List fetch with the default query, as used after every mutation.
    pub fn refresh() -> Self {
        Self::FetchList(ListQuery::default())
    }
}

impl<E: Entity> From<EntityCommand<E>> for Command {
    fn from(command: EntityCommand<E>) -> Self {
        E::wrap_command(command)
    }
}

pub struct EntityReducer<E>(PhantomData<E>);

impl<E: Entity> EntityReducer<E> {
    fn refresh() -> Effect {
        Effect::Dispatch(EntityCommand::<E>::refresh().into())
    }
}

impl<E: Entity> Reducer for EntityReducer<E> {
    type State = EntityState<E>;
    type Intent = EntityAction<E>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Next<Self::State> {
        let messages = E::MESSAGES;

        match intent {
            EntityAction::FetchList(phase) => {
                state.fetch_list.track(&phase);
                match phase {
                    Phase::Pending => Next::new(state),
                    Phase::Fulfilled(page) => {
                        state.total_pages = page.page_count();
                        state.list = page.items;
                        Next::new(state)
                    }
                    Phase::Rejected(_) => {
                        Next::new(state).with(Effect::error(messages.fetch_list_failed))
                    }
                }
            }

            EntityAction::FetchOne(phase) => {
                state.fetch_one.track(&phase);
                match phase {
                    Phase::Pending => Next::new(state),
                    Phase::Fulfilled(record) => {
                        state.detail = Some(record);
                        Next::new(state)
                    }
                    Phase::Rejected(_) => {
                        Next::new(state).with(Effect::error(messages.fetch_one_failed))
                    }
                }
            }

            EntityAction::Create(phase) => {
                state.create.track(&phase);
                match phase {
                    Phase::Pending => Next::new(state),
                    Phase::Fulfilled(record) => {
                        state.detail = Some(record);
                        Next::new(state).extend([
                            Effect::success(messages.created),
                            Self::refresh(),
                            Effect::navigate(E::ROUTE, CREATE_REDIRECT_DELAY),
                        ])
                    }
                    Phase::Rejected(_) => {
                        Next::new(state).with(Effect::error(messages.create_failed))
                    }
                }
            }

            EntityAction::Update(phase) => {
                state.update.track(&phase);
                match phase {
                    Phase::Pending => Next::new(state),
                    Phase::Fulfilled(record) => {
                        state.detail = Some(record);
                        Next::new(state).extend([Effect::success(messages.updated), Self::refresh()])
                    }
                    Phase::Rejected(_) => {
                        Next::new(state).with(Effect::error(messages.update_failed))
                    }
                }
            }

            EntityAction::Delete(phase) => {
                state.delete.track(&phase);
                match phase {
                    Phase::Pending => Next::new(state),
                    Phase::Fulfilled(_) => Next::new(state)
                        .extend([Effect::success(messages.deleted), Self::refresh()]),
                    Phase::Rejected(_) => {
                        Next::new(state).with(Effect::error(messages.delete_failed))
                    }
                }
            }

            EntityAction::Link { op, phase } => {
                state.link.track(&phase);
                match phase {
                    Phase::Pending => Next::new(state),
                    Phase::Fulfilled(owner) => Next::new(state).with(Effect::Dispatch(
                        EntityCommand::<E>::FetchOne(owner).into(),
                    )),
                    Phase::Rejected(error) => {
                        let text = match op {
                            LinkOp::Add => messages.link_add_failed,
                            LinkOp::Remove => messages.link_remove_failed,
                        };
                        // Entities without relations report the rejection itself.
                        let text = text.map_or(error, str::to_string);
                        Next::new(state).with(Effect::error(text))
                    }
                }
            }
        }
    }
}
