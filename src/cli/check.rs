//! The `check` command: run the variable audit
//!
//! Resolves credentials (flags beat environment beats config file), builds
//! the project list (an ad-hoc `--project-name`/`--config-dir` pair, or the
//! `[[projects]]` entries from the config file), then analyzes each project
//! in sequence and renders its report.
//!
//! A failing project does not abort the batch: its error is displayed and the
//! remaining projects are still audited. The command exits non-zero only when
//! startup configuration is invalid or every project failed.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::warn;

use crate::analysis::Analyzer;
use crate::config::{GlobalConfig, ProjectEntry};
use crate::core::{AuditError, user_friendly_error};
use crate::octopus::OctopusClient;
use crate::report::{ReportOptions, render_project};

/// Command to audit variable usage across projects and environments
#[derive(Args)]
pub struct CheckCommand {
    /// Octopus server URL
    #[arg(long, env = "OCTOPUS_URL")]
    server_url: Option<String>,

    /// Octopus API key
    #[arg(long, env = "OCTOPUS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Audit a single project by its Octopus name
    ///
    /// Requires `--config-dir`. Without this flag, the projects listed in the
    /// configuration file are audited.
    #[arg(long)]
    project_name: Option<String>,

    /// Directory holding the project's Web.Release.config and Web.config
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Display where each missing variable is used
    #[arg(short = 'u', long)]
    show_usage: bool,

    /// Display results page by page
    #[arg(short = 'p', long)]
    paginate: bool,

    /// Skip environments in the restricted zone (name ending in -DMZ)
    #[arg(long)]
    ignore_dmz: bool,
}

impl CheckCommand {
    /// Execute the audit
    ///
    /// # Errors
    ///
    /// Fails before any analysis on configuration problems (unreadable config
    /// file, missing credentials, `--project-name` without `--config-dir`),
    /// and after the batch when no project could be audited successfully.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = GlobalConfig::load_with_optional(config_path).await?;

        let projects = self.resolve_projects(&config)?;
        if projects.is_empty() {
            println!("No project to audit. Add [[projects]] entries to the config file or pass --project-name.");
            return Ok(());
        }

        let (server_url, api_key) =
            config.resolve_credentials(self.server_url.as_deref(), self.api_key.as_deref())?;

        let analyzer = Analyzer::new(OctopusClient::new(server_url, api_key));
        let options = ReportOptions {
            show_usage: self.show_usage,
            paginate: self.paginate,
            ignore_dmz: self.ignore_dmz,
        };

        let mut failures = 0usize;
        for project in &projects {
            println!(
                "Config file: {}",
                project.config_dir.join(crate::analysis::usage::RELEASE_CONFIG_FILE).display()
            );

            match analyzer.analyze(&project.name, &project.config_dir).await {
                Ok(result) => render_project(&result, &project.name, options),
                Err(e) => {
                    warn!("Audit of project '{}' failed", project.name);
                    user_friendly_error(e).display();
                    failures += 1;
                }
            }
        }

        if failures == projects.len() {
            anyhow::bail!("all {} project audit(s) failed", failures);
        }

        Ok(())
    }

    /// Build the list of projects to audit
    ///
    /// An explicit `--project-name` (with its mandatory `--config-dir`) wins
    /// over the config file's project list.
    fn resolve_projects(&self, config: &GlobalConfig) -> Result<Vec<ProjectEntry>> {
        match (&self.project_name, &self.config_dir) {
            (Some(name), Some(dir)) => Ok(vec![ProjectEntry {
                name: name.clone(),
                config_dir: dir.clone(),
            }]),
            (Some(_), None) => Err(AuditError::ProjectNameRequiresDir.into()),
            _ => Ok(config.projects.clone()),
        }
    }
}
