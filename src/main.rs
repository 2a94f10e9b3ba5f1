use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use trackcase::actions::resource::{self, Resource};
use trackcase::actions::{Actions, ListOptions};
use trackcase::config::Config;
use trackcase::http::HttpClient;
use trackcase::models::Entity;
use trackcase::storage::FileStorage;
use trackcase::store::{Domain, RequestMetadata, Store};

#[derive(Parser, Debug)]
#[command(name = "trackcase", version, about = "TrackCase command-line client")]
struct Cli {
    /// Config file (default: platform config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session token.
    Login {
        username: String,
        #[arg(long, env = "TRACKCASE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the persisted session.
    Logout,
    /// Check that the backend database answers.
    Ping,
    /// List the records of a resource.
    #[command(alias = "ls")]
    List(ListArgs),
    /// Show one record.
    Get(GetArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Resource name, e.g. `court_cases` or `filing-types`.
    resource: Domain,
    /// Bypass the cache.
    #[arg(long)]
    force: bool,
    #[arg(long, requires = "per_page")]
    page: Option<u32>,
    #[arg(long, requires = "page")]
    per_page: Option<u32>,
}

#[derive(Args, Debug)]
struct GetArgs {
    resource: Domain,
    id: i64,
    /// Include related records.
    #[arg(long)]
    extra: bool,
}

macro_rules! with_resource {
    ($domain:expr, $handler:ident ( $($arg:expr),* )) => {
        match $domain {
            Domain::CourtCases => $handler(resource::COURT_CASES, $($arg),*).await,
            Domain::Clients => $handler(resource::CLIENTS, $($arg),*).await,
            Domain::Judges => $handler(resource::JUDGES, $($arg),*).await,
            Domain::Courts => $handler(resource::COURTS, $($arg),*).await,
            Domain::Filings => $handler(resource::FILINGS, $($arg),*).await,
            Domain::HearingCalendars => $handler(resource::HEARING_CALENDARS, $($arg),*).await,
            Domain::TaskCalendars => $handler(resource::TASK_CALENDARS, $($arg),*).await,
            Domain::CaseCollections => $handler(resource::CASE_COLLECTIONS, $($arg),*).await,
            Domain::CashCollections => $handler(resource::CASH_COLLECTIONS, $($arg),*).await,
            Domain::CaseTypes => $handler(resource::CASE_TYPES, $($arg),*).await,
            Domain::FilingTypes => $handler(resource::FILING_TYPES, $($arg),*).await,
            Domain::HearingTypes => $handler(resource::HEARING_TYPES, $($arg),*).await,
            Domain::TaskTypes => $handler(resource::TASK_TYPES, $($arg),*).await,
            Domain::CollectionMethods => $handler(resource::COLLECTION_METHODS, $($arg),*).await,
            Domain::ComponentStatuses => $handler(resource::COMPONENT_STATUSES, $($arg),*).await,
        }
    };
}

#[tokio::main]
async fn main() -> Result<()> {
    trackcase::init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let storage_path = config.storage.file_path();
    let storage = FileStorage::open(&storage_path)
        .with_context(|| format!("opening storage at {}", storage_path.display()))?;
    let client = HttpClient::new(config, Arc::new(storage)).context("building HTTP client")?;
    let actions = Actions::new(Store::new(), Arc::new(client));

    let output = match cli.command {
        Command::Login { username, password } => {
            let outcome = actions.login(&username, &password).await?;
            serde_json::to_value(&outcome.user_details)?
        }
        Command::Logout => {
            actions.logout()?;
            Value::Null
        }
        Command::Ping => Value::String(actions.test_database().await?),
        Command::List(args) => {
            let metadata = args
                .page
                .zip(args.per_page)
                .map(|(page, per_page)| RequestMetadata::page(page, per_page));
            let options = ListOptions {
                force: args.force,
                metadata,
            };
            with_resource!(args.resource, list_json(&actions, options))?
        }
        Command::Get(args) => with_resource!(args.resource, get_json(&actions, args.id, args.extra))?,
    };

    if !output.is_null() {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    let alert = actions.store().select(|s| s.alert.clone());
    if let Some(kind) = alert.message_type {
        eprintln!("[{}] {}", kind.as_str(), alert.message_text);
    }
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::load()?);
    };
    let mut config = Config::load_from(path)?;
    config.apply_env(|name| std::env::var(name).ok());
    config.validate()?;
    Ok(config)
}

async fn list_json<E: Entity>(
    resource: Resource<E>,
    actions: &Actions,
    options: ListOptions,
) -> Result<Value> {
    let items = actions.list(resource, options).await?;
    Ok(serde_json::to_value(items)?)
}

async fn get_json<E: Entity>(
    resource: Resource<E>,
    actions: &Actions,
    id: i64,
    extra: bool,
) -> Result<Value> {
    let record = actions
        .get_one(resource, id, extra)
        .await
        .with_context(|| format!("{} {} not found", resource.domain().singular(), id))?;
    Ok(serde_json::to_value(record)?)
}
