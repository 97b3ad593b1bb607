mod commands;
mod config;
mod controllers;
mod render;
mod store;
mod views;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventdesk_core::identity::Identity;
use eventdesk_core::repository::EventRepository;
use tracing_subscriber::EnvFilter;

use crate::commands::FieldArgs;
use crate::config::AppConfig;
use crate::store::FileStore;

#[derive(Parser)]
#[command(name = "eventdesk")]
#[command(about = "Schedule campus events and track the ones assigned to you")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule a new event
    Schedule(FieldArgs),
    /// Edit an existing event (drops it back to pending approval)
    Update {
        /// Id of the event to edit
        event_id: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// List the events you are assigned to work
    Events,
    /// Show one event in full
    Show { event_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let store = Arc::new(FileStore::open(config.data_path())?);
    let repo = Arc::new(EventRepository::new(store));

    // Identity is consumed, not implemented: seed the channel with the uid
    // the external auth flow recorded in config.
    let (identity_handle, identity) = Identity::channel();
    if let Some(uid) = &config.user {
        let profile = repo.ensure_profile(uid).await?;
        identity_handle.sign_in(profile);
    }

    match cli.command {
        Commands::Schedule(fields) => commands::schedule::run(repo, identity, fields).await,
        Commands::Update { event_id, fields } => {
            commands::update::run(repo, identity, event_id, fields).await
        }
        Commands::Events => commands::events::run(repo, identity).await,
        Commands::Show { event_id } => commands::show::run(repo, &event_id).await,
    }
}
