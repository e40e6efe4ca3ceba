//! octaudit - Octopus Deploy variable audit
//!
//! A CLI that reconciles the variables a deployment project *uses* against
//! the variables each environment *defines*, reporting, per environment:
//! variables referenced but never defined (missing) and variables defined but
//! never referenced (unused).
//!
//! # How It Works
//!
//! For each audited project, two independent collections run against the same
//! project identity and fill one [`analysis::AnalysisResult`]:
//!
//! - **Usage collection** walks the deployment process (steps → actions →
//!   properties) and two conventional config files
//!   (`Web.Release.config`, `Web.config`) for `#{Variable}` placeholders and
//!   appSettings keys.
//! - **Definition collection** walks the project's own variable set and every
//!   attached library variable set, bucketing definitions per environment and
//!   tagging each with its origin.
//!
//! The reconciliation queries then compute the per-environment set
//! differences, with three deliberate exclusions: `Octopus.*` system
//! variables are never missing, appSettings-only keys are never missing, and
//! library-owned definitions are never unused.
//!
//! # Core Modules
//!
//! - [`analysis`] - placeholder extraction, usage/definition collectors, and
//!   the reconciliation engine (the algorithmic core)
//! - [`octopus`] - the Octopus REST API contract, models, and HTTP client
//! - [`config`] - global configuration (`~/.octaudit/config.toml`)
//! - [`report`] - fixed-width console rendering of audit results
//! - [`cli`] - clap command definitions and the batch driver
//! - [`core`] - error taxonomy and user-facing error reporting
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Audit all configured projects
//! octaudit check
//!
//! # Audit one project against an explicit config directory
//! octaudit check --project-name Billing --config-dir /srv/deploy/billing
//!
//! # Show where each missing variable is referenced
//! octaudit check --show-usage
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod octopus;
pub mod report;
