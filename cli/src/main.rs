//! Deckhand CLI
//!
//! Audit who can access an organization's boards, lock the organization
//! down, offboard members, and download backup exports.

mod args;
mod commands;
mod report;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deckhand_api::{ApiClient, ApiConfig, Credentials};

use crate::args::{Cli, Commands};
use crate::commands::{audit, export, manage};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deckhand=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let credentials = Credentials::resolve(cli.global.key.clone(), cli.global.token.clone())?;
    let mut config = ApiConfig::new(credentials);
    if let Some(base_url) = &cli.global.base_url {
        config = config.with_base_url(base_url.clone());
    }
    let client = ApiClient::new(config);

    match cli.command {
        Commands::Audit {
            org,
            summary,
            all,
            user,
            json,
        } => {
            let mode = audit::mode_from_flags(summary, all, user);
            audit::run(&client, &org, mode, json).await
        }
        Commands::Export {
            id_organization,
            download_attachments,
            attachment_age,
            poll_interval,
            max_attempts,
            out_file,
        } => {
            let options = export::ExportOptions {
                organization: id_organization,
                download_attachments,
                attachment_age,
                poll_interval: Duration::from_secs(poll_interval),
                max_attempts,
            };
            export::run(&client, &options, &out_file).await
        }
        Commands::Lockdown { org, execute } => manage::lockdown(&client, &org, execute).await,
        Commands::Offboard { query, execute } => manage::offboard(&client, &query, execute).await,
    }
}
