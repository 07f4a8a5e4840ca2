//! The backup export command

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tracing::info;

use deckhand_api::{ApiClient, ExportApi, ExportPoller};

pub struct ExportOptions {
    pub organization: String,
    pub download_attachments: bool,
    pub attachment_age: u32,
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

/// Request an export, poll until it is ready, and stream the archive to
/// `out_file`. Ctrl-C stops the poll wait cleanly.
pub async fn run(client: &ApiClient, options: &ExportOptions, out_file: &Path) -> Result<()> {
    let token = client
        .request_export(
            &options.organization,
            options.download_attachments,
            options.attachment_age,
        )
        .await?;
    info!(org = %options.organization, "export requested");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    let poller = ExportPoller::new(client, options.organization.clone())
        .with_poll_interval(options.poll_interval)
        .with_max_attempts(options.max_attempts);
    let completion_path = poller.run(&token, shutdown_rx).await?;

    let written = client.download_export(&completion_path, out_file).await?;
    println!(
        "organization export downloaded to {} ({} bytes)",
        out_file.display(),
        written
    );
    Ok(())
}
