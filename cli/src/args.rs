use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deckhand")]
#[command(about = "Audit and manage organization membership via the boards API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// API key (falls back to DECKHAND_KEY)
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// API token (falls back to DECKHAND_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report who can access the organization and its boards
    Audit {
        /// Organization id or orgname
        #[arg(long)]
        org: String,

        /// Print only the member summary table
        #[arg(long)]
        summary: bool,

        /// Print the summary and board details for all members
        #[arg(long)]
        all: bool,

        /// Print only the board details for one member, by username
        #[arg(long)]
        user: Option<String>,

        /// Emit the merged member list as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Download a backup export of an organization's data
    Export {
        /// Organization id (the orgname works too, but can change; the id cannot)
        #[arg(long)]
        id_organization: String,

        /// Include attachments in the export
        #[arg(long)]
        download_attachments: bool,

        /// Only include attachments uploaded in the past N days; 0 means all
        #[arg(long, default_value = "0")]
        attachment_age: u32,

        /// Seconds between status polls; do not use less than 60 in production
        #[arg(long, default_value = "60")]
        poll_interval: u64,

        /// Give up after this many status polls
        #[arg(long, default_value = "240")]
        max_attempts: u32,

        /// Where to write the downloaded archive
        #[arg(long, default_value = "export.zip")]
        out_file: PathBuf,
    },

    /// Restrict an organization's boards to organization members
    Lockdown {
        /// Organization id or orgname
        #[arg(long)]
        org: String,

        /// Apply changes instead of the default dry run
        #[arg(long)]
        execute: bool,
    },

    /// Deactivate or remove a member across your organizations
    Offboard {
        /// Username or email address to search for
        #[arg(long)]
        query: String,

        /// Apply changes instead of the default dry run
        #[arg(long)]
        execute: bool,
    },
}
