//! Command-line interface for octaudit
//!
//! The CLI wraps the audit pipeline in a single `check` subcommand plus the
//! global options shared by any future subcommands. Each command lives in its
//! own module with its own argument structure and execution logic.
//!
//! # Usage
//!
//! ```bash
//! # Audit every project listed in ~/.octaudit/config.toml
//! octaudit check
//!
//! # Audit one ad-hoc project
//! octaudit check --project-name Billing --config-dir /srv/deploy/billing
//!
//! # Credentials from flags or environment instead of the config file
//! octaudit check --server-url https://octopus.example.com --api-key API-XXXX
//! OCTOPUS_URL=... OCTOPUS_API_KEY=... octaudit check
//!
//! # Presentation switches
//! octaudit check --show-usage --paginate --ignore-dmz
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - debug-level diagnostics on stderr
//! - `--quiet` - errors only
//! - `--config` - custom config file path (default `~/.octaudit/config.toml`)

mod check;

pub use check::CheckCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Top-level CLI structure for octaudit
#[derive(Parser)]
#[command(
    name = "octaudit",
    about = "Audit Octopus Deploy variable usage - find missing and unused variables per environment",
    version,
    author
)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    ///
    /// Shows API requests, file scans, and collector progress. Equivalent to
    /// `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors and the report itself
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a custom configuration file
    ///
    /// Overrides the default location (`~/.octaudit/config.toml`) and the
    /// `OCTAUDIT_CONFIG` environment variable.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available octaudit subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Audit variable usage for one or all configured projects
    ///
    /// See [`CheckCommand`] for detailed options and behavior.
    Check(CheckCommand),
}

impl Cli {
    /// Execute the parsed command
    ///
    /// Initializes logging according to the verbosity flags, then dispatches
    /// to the subcommand.
    pub async fn execute(self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        match self.command {
            Commands::Check(cmd) => cmd.execute(self.config).await,
        }
    }
}

/// Set up the tracing subscriber once, honoring RUST_LOG when set
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
