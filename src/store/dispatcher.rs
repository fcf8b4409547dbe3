//! Runs commands: pending, one request, then fulfilled or rejected.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::ApiError;
use crate::entity::Entity;

use super::action::{Action, Command};
use super::auth::{AuthAction, AuthCommand};
use super::entity::{EntityAction, EntityCommand};
use super::op::Phase;
use super::Inner;

pub(crate) type DispatchFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

impl Inner {
    /// Boxed so follow-up dispatches can spawn this same future type.
    pub(crate) fn run(self: Arc<Self>, command: Command) -> DispatchFuture {
        let (resource, op) = command.label();
        let span = info_span!("dispatch", request_id = %Uuid::new_v4(), resource, op);

        Box::pin(
            async move {
                match command {
                    Command::Auth(c) => self.run_auth(c).await,
                    Command::Users(c) => self.run_entity(c).await,
                    Command::Projects(c) => self.run_entity(c).await,
                    Command::Experiences(c) => self.run_entity(c).await,
                    Command::Technologies(c) => self.run_entity(c).await,
                    Command::Tags(c) => self.run_entity(c).await,
                }
            }
            .instrument(span),
        )
    }

    async fn run_auth(self: &Arc<Self>, command: AuthCommand) {
        let auth = self.api.auth();
        match command {
            AuthCommand::Login { email, password } => {
                self.track(
                    |p| Action::Auth(AuthAction::Login(p)),
                    async { auth.login(&email, &password).await.map(|r| r.token) },
                )
                .await
            }
            AuthCommand::Recover { email } => {
                self.track(
                    |p| Action::Auth(AuthAction::Recover(p)),
                    auth.recover_password(&email),
                )
                .await
            }
            AuthCommand::ChangePassword { token, password } => {
                self.track(
                    |p| Action::Auth(AuthAction::ChangePassword(p)),
                    auth.change_password(&token, &password),
                )
                .await
            }
        }
    }

    async fn run_entity<E: Entity>(self: &Arc<Self>, command: EntityCommand<E>) {
        let api = self.api.resource::<E>();
        match command {
            EntityCommand::FetchList(query) => {
                self.track(
                    |p| E::wrap_action(EntityAction::FetchList(p)),
                    api.list(&query),
                )
                .await
            }
            EntityCommand::FetchOne(id) => {
                self.track(|p| E::wrap_action(EntityAction::FetchOne(p)), api.get(id))
                    .await
            }
            EntityCommand::Create(data) => {
                self.track(
                    |p| E::wrap_action(EntityAction::Create(p)),
                    api.create(&data),
                )
                .await
            }
            EntityCommand::Update { id, data } => {
                self.track(
                    |p| E::wrap_action(EntityAction::Update(p)),
                    api.update(id, &data),
                )
                .await
            }
            EntityCommand::Delete(id) => {
                self.track(
                    |p| E::wrap_action(EntityAction::Delete(p)),
                    async { api.delete(id).await.map(|()| id) },
                )
                .await
            }
            EntityCommand::Link { op, owner, target } => {
                self.track(
                    |phase| E::wrap_action(EntityAction::Link { op, phase }),
                    async { api.link(op, owner, target).await.map(|()| owner) },
                )
                .await
            }
        }
    }

    /// Applies `Pending`, awaits the call, then applies the outcome.
    ///
    /// Errors stop here: they become a `Rejected` phase carrying the
    /// error's display text.
    async fn track<T, F>(self: &Arc<Self>, wrap: impl Fn(Phase<T>) -> Action, call: F)
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.apply(wrap(Phase::Pending));
        match call.await {
            Ok(value) => {
                debug!("fulfilled");
                self.apply(wrap(Phase::Fulfilled(value)));
            }
            Err(e) => {
                warn!(error = %e, "rejected");
                self.apply(wrap(Phase::Rejected(e.to_string())));
            }
        }
    }
}
