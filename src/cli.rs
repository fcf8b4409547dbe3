//! Command-line front end: one command, one dispatch, JSON on stdout.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{AssetKind, ListQuery};
use crate::config::Config;
use crate::entity::{Entity, Id, LinkOp};
use crate::model::{Experience, Project, Tag, Technology, User};
use crate::session::FileSession;
use crate::store::{AuthCommand, EntityCommand, LogNavigator, OpState, Store};

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Admin client for the portfolio API")]
pub struct Cli {
    /// Config file (default: <config dir>/folio/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Session file holding the login token
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Log in and keep the token for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored token
    Logout,
    /// Send a password recovery email
    Recover {
        #[arg(long)]
        email: String,
    },
    /// Set a new password using the token from the recovery email
    ChangePassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
    },
    /// List one page of records
    List {
        resource: Resource,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        /// Field to search on (required for users: email, firstName, lastName)
        #[arg(long)]
        search_by: Option<String>,
    },
    /// Fetch one record
    Show { resource: Resource, id: Id },
    /// Create a record from a JSON payload
    Create {
        resource: Resource,
        #[arg(long)]
        data: String,
    },
    /// Replace a record with a JSON payload
    Update {
        resource: Resource,
        id: Id,
        #[arg(long)]
        data: String,
    },
    /// Delete a record
    Delete { resource: Resource, id: Id },
    /// Attach a technology to a project, or a tag to a technology
    Link {
        owner: LinkOwner,
        id: Id,
        target: Id,
    },
    /// Detach a technology from a project, or a tag from a technology
    Unlink {
        owner: LinkOwner,
        id: Id,
        target: Id,
    },
    /// Upload an image to the asset host and print its URL
    Upload { kind: UploadKind, file: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    #[value(alias = "user")]
    Users,
    #[value(alias = "project")]
    Projects,
    #[value(alias = "experience")]
    Experiences,
    #[value(alias = "technology")]
    Technologies,
    #[value(alias = "tag")]
    Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkOwner {
    Project,
    Technology,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UploadKind {
    Avatar,
    Project,
    Technology,
}

impl From<UploadKind> for AssetKind {
    fn from(kind: UploadKind) -> Self {
        match kind {
            UploadKind::Avatar => AssetKind::Avatar,
            UploadKind::Project => AssetKind::ProjectCover,
            UploadKind::Technology => AssetKind::TechnologyIcon,
        }
    }
}

/// Entity operation parsed from the command line.
enum Op {
    List(ListQuery),
    Show(Id),
    Create(String),
    Update(Id, String),
    Delete(Id),
    Link(LinkOp, Id, Id),
}

/// What a command printed and whether its primary operation succeeded.
struct Outcome {
    result: Value,
    ok: bool,
}

impl Outcome {
    fn from_op(op: &OpState, result: Value) -> Self {
        Self {
            result,
            ok: !matches!(op, OpState::Failed(_)),
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = Config::load_with_env(&config_path).context("loading config")?;
    let session = Arc::new(FileSession::new(
        cli.session.unwrap_or_else(FileSession::default_path),
    ));
    let store = Store::new(&config, session, Arc::new(LogNavigator))?;

    let outcome = match cli.command {
        CliCommand::Login { email, password } => {
            store.dispatch(AuthCommand::Login { email, password }).await;
            store.settle().await;
            let auth = store.select(|s| s.auth.clone());
            Outcome::from_op(&auth.login, json!({ "logged_in": auth.token.is_some() }))
        }
        CliCommand::Logout => {
            store.logout();
            Outcome {
                result: json!({ "logged_in": false }),
                ok: true,
            }
        }
        CliCommand::Recover { email } => {
            store.dispatch(AuthCommand::Recover { email }).await;
            let auth = store.select(|s| s.auth.clone());
            Outcome::from_op(&auth.recover, json!({ "sent": auth.sent() }))
        }
        CliCommand::ChangePassword { token, password } => {
            store
                .dispatch(AuthCommand::ChangePassword { token, password })
                .await;
            let auth = store.select(|s| s.auth.clone());
            Outcome::from_op(&auth.change_password, json!({ "changed": auth.changed() }))
        }
        CliCommand::List {
            resource,
            page,
            limit,
            search,
            search_by,
        } => {
            let query = ListQuery {
                page,
                limit,
                search,
                search_by,
            };
            run_resource(&store, resource, Op::List(query)).await?
        }
        CliCommand::Show { resource, id } => run_resource(&store, resource, Op::Show(id)).await?,
        CliCommand::Create { resource, data } => {
            run_resource(&store, resource, Op::Create(data)).await?
        }
        CliCommand::Update { resource, id, data } => {
            run_resource(&store, resource, Op::Update(id, data)).await?
        }
        CliCommand::Delete { resource, id } => {
            run_resource(&store, resource, Op::Delete(id)).await?
        }
        CliCommand::Link { owner, id, target } => {
            run_resource(&store, owner.into(), Op::Link(LinkOp::Add, id, target)).await?
        }
        CliCommand::Unlink { owner, id, target } => {
            run_resource(&store, owner.into(), Op::Link(LinkOp::Remove, id, target)).await?
        }
        CliCommand::Upload { kind, file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let url = store.api().assets().upload(kind.into(), &name, bytes).await;
            Outcome {
                ok: url.is_some(),
                result: json!({ "url": url }),
            }
        }
    };

    store.settle().await;
    print(&store, outcome.result)?;
    Ok(if outcome.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

impl From<LinkOwner> for Resource {
    fn from(owner: LinkOwner) -> Self {
        match owner {
            LinkOwner::Project => Resource::Projects,
            LinkOwner::Technology => Resource::Technologies,
        }
    }
}

async fn run_resource(store: &Store, resource: Resource, op: Op) -> anyhow::Result<Outcome> {
    match resource {
        Resource::Users => run_entity::<User>(store, op).await,
        Resource::Projects => run_entity::<Project>(store, op).await,
        Resource::Experiences => run_entity::<Experience>(store, op).await,
        Resource::Technologies => run_entity::<Technology>(store, op).await,
        Resource::Tags => run_entity::<Tag>(store, op).await,
    }
}

async fn run_entity<E: Entity>(store: &Store, op: Op) -> anyhow::Result<Outcome> {
    match op {
        Op::List(query) => {
            store.dispatch(EntityCommand::<E>::FetchList(query)).await;
            let slice = store.slice::<E>();
            Ok(Outcome::from_op(
                &slice.fetch_list,
                json!({ "items": to_value(&slice.list)?, "total_pages": slice.total_pages }),
            ))
        }
        Op::Show(id) => {
            store.dispatch(EntityCommand::<E>::FetchOne(id)).await;
            let slice = store.slice::<E>();
            Ok(Outcome::from_op(&slice.fetch_one, to_value(&slice.detail)?))
        }
        Op::Create(raw) => {
            let data: E::Create = serde_json::from_str(&raw).context("parsing --data")?;
            store.dispatch(EntityCommand::<E>::Create(data)).await;
            let slice = store.slice::<E>();
            Ok(Outcome::from_op(&slice.create, to_value(&slice.detail)?))
        }
        Op::Update(id, raw) => {
            let data: E::Update = serde_json::from_str(&raw).context("parsing --data")?;
            store.dispatch(EntityCommand::<E>::Update { id, data }).await;
            let slice = store.slice::<E>();
            Ok(Outcome::from_op(&slice.update, to_value(&slice.detail)?))
        }
        Op::Delete(id) => {
            store.dispatch(EntityCommand::<E>::Delete(id)).await;
            let slice = store.slice::<E>();
            Ok(Outcome::from_op(&slice.delete, json!({ "deleted": id })))
        }
        Op::Link(op, owner, target) => {
            store
                .dispatch(EntityCommand::<E>::Link { op, owner, target })
                .await;
            // The owner is re-fetched by a follow-up dispatch.
            store.settle().await;
            let slice = store.slice::<E>();
            Ok(Outcome::from_op(&slice.link, to_value(&slice.detail)?))
        }
    }
}

fn to_value<T: Serialize>(value: &T) -> anyhow::Result<Value> {
    serde_json::to_value(value).context("serializing output")
}

fn print(store: &Store, result: Value) -> anyhow::Result<()> {
    let notification = store.select(|s| s.notification.clone());
    let mut output = json!({ "result": result });
    if notification.visible {
        output["notification"] = json!({
            "kind": notification.kind,
            "text": notification.text,
        });
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
