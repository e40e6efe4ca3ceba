//! Variable reconciliation: the core of octaudit
//!
//! Reconciliation answers two questions per environment:
//! - which variables does the project *reference* that the environment never
//!   *defines* (missing variables), and
//! - which variables does the environment *define* that the project never
//!   *references* (unused variables)?
//!
//! The pieces, leaves first:
//! - [`placeholder`] - extracts `#{...}` variable references from text
//! - [`usage`] - walks the deployment process and the project's config files,
//!   aggregating references into the accumulator
//! - [`definitions`] - walks the project and library variable sets,
//!   recording per-environment definitions
//! - [`result`] - the [`AnalysisResult`] accumulator and the two
//!   reconciliation queries over it
//! - [`Analyzer`] - drives all of the above for one project
//!
//! Collectors mutate an explicit accumulator passed in by the analyzer; there
//! is no ambient shared state, and each project gets a fresh accumulator. A
//! collector failure aborts the project's analysis; the partial accumulator
//! is dropped rather than reported.

pub mod definitions;
pub mod placeholder;
pub mod result;
pub mod usage;

pub use placeholder::placeholders;
pub use result::{
    AnalysisResult, DefinedVariable, Environment, UsageKind, UsedVariable, VariableOrigin,
};

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::octopus::OctopusApi;

/// Drives the full audit of one project against one Octopus server
///
/// The analyzer is generic over the [`OctopusApi`] provider so the whole
/// pipeline runs against an in-memory fixture in tests. Projects are analyzed
/// strictly sequentially; the analyzer holds no per-project state of its own.
pub struct Analyzer<P> {
    api: P,
}

impl<P: OctopusApi> Analyzer<P> {
    /// Create an analyzer over the given API provider
    pub const fn new(api: P) -> Self {
        Self { api }
    }

    /// Run the complete analysis for one project
    ///
    /// Loads the environment listing, collects variable usage (deployment
    /// process, release config, app settings), then collects definitions
    /// (library sets, then the project's own set) into a fresh
    /// [`AnalysisResult`].
    ///
    /// # Errors
    ///
    /// Any collector or API failure is fatal to this project's analysis and
    /// propagates unchanged; no partial result is returned.
    pub async fn analyze(&self, project_name: &str, config_dir: &Path) -> Result<AnalysisResult> {
        info!("Analyzing project '{}'", project_name);

        let mut result = AnalysisResult::new();

        let environments = self
            .api
            .environments()
            .await?
            .into_iter()
            .map(|e| Environment {
                id: e.id,
                name: e.name,
            })
            .collect();
        result.set_environments(environments);

        let project = self.api.find_project_by_name(project_name).await?;

        let process = self.api.deployment_process(&project.deployment_process_id).await?;
        usage::collect_step_usage(&mut result, &process);
        usage::collect_release_config(&mut result, config_dir)?;
        usage::collect_app_settings(&mut result, config_dir)?;

        definitions::collect_library_definitions(&self.api, &mut result, &project).await?;
        definitions::collect_project_definitions(&self.api, &mut result, &project).await?;

        Ok(result)
    }
}
