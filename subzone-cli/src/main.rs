//! `subzone` admin command line
//!
//! Registers root domains and provisions name records under them, against the SQLite store
//! and external DNS provider configured in `config.toml`.

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use subzone_app::{AppConfig, AppState};
use subzone_core::types::{DomainStatus, RecordType};

use output::Output;

#[derive(Debug, Parser)]
#[command(name = "subzone")]
#[command(about = "Provision subdomains under shared root domains")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "SUBZONE_CONFIG")]
    config: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage root domains
    #[command(subcommand)]
    Domain(DomainCommand),

    /// Manage name records
    #[command(subcommand)]
    Record(RecordCommand),
}

#[derive(Debug, Args)]
struct CredentialArgs {
    /// Provider API token
    #[arg(long, env = "SUBZONE_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Provider zone ID
    #[arg(long)]
    zone_id: Option<String>,
}

#[derive(Debug, Subcommand)]
enum DomainCommand {
    /// Register a root domain
    Add {
        root_domain: String,
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// List domains (only the user's active ones with --user)
    List {
        #[arg(long)]
        user: Option<String>,
    },

    /// Enable or disable a domain
    Status { domain_id: String, status: DomainStatus },

    /// Replace provider credentials; omitted fields are cleared
    Credentials {
        domain_id: String,
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Delete a domain with all its records and assignments
    Delete { domain_id: String },

    /// Allow a user to create records under a domain
    Assign { domain_id: String, user: String },

    /// Revoke a user's assignment
    Unassign { domain_id: String, user: String },

    /// Verify stored credentials, or the given --token/--zone-id pair
    Verify {
        #[arg(required_unless_present_all = ["token", "zone_id"])]
        domain_id: Option<String>,
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// List the records the external provider holds for the domain's zone
    Records { domain_id: String },
}

#[derive(Debug, Subcommand)]
enum RecordCommand {
    /// Check whether a name is free under a domain
    Check { domain_id: String, name: String },

    /// Create a record
    Create {
        domain_id: String,
        name: String,
        #[arg(value_name = "TYPE")]
        record_type: RecordType,
        target: String,
        /// Owning user
        #[arg(long)]
        user: String,
        /// Skip the reserved-name check
        #[arg(long)]
        allow_reserved: bool,
    },

    /// Change a record's type and target
    Update {
        record_id: String,
        #[arg(value_name = "TYPE")]
        record_type: RecordType,
        target: String,
    },

    /// Delete a record
    Delete { record_id: String },

    /// List records, optionally filtered by user and/or domain
    List {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        domain: Option<String>,
    },
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.log_level);

    let state = AppState::open(&config)
        .await
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;
    tracing::debug!("Using database {}", config.database_path.display());

    let out = Output::new(cli.json);
    match cli.command {
        Command::Domain(cmd) => commands::domain(cmd, &state, &out).await,
        Command::Record(cmd) => commands::record(cmd, &state, &out).await,
    }
}
