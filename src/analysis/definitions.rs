//! Definition collection: which variables exist per environment?
//!
//! Definitions come from two origins: the project's own variable set and the
//! library variable sets the project includes. Each variable is expanded into
//! one [`DefinedVariable`](super::result::DefinedVariable) record per
//! environment id in its scope, tagged with the origin so the unused-variable
//! report can leave library definitions alone.
//!
//! Fixed policy carried over from the original behavior: only the *first*
//! scope dimension of each variable is consulted (see
//! [`VariableResource::first_scope_ids`]). Environment scoping is what is
//! expected there; a variable scoped first by some other dimension is
//! mis-attributed or dropped, and an unscoped variable contributes nothing.

use anyhow::Result;
use tracing::debug;

use super::result::{AnalysisResult, VariableOrigin};
use crate::octopus::{OctopusApi, ProjectResource, VariableResource};

/// Record the definitions inherited from the project's library variable sets
///
/// Resolves the library sets whose ids appear in the project's included list,
/// fetches each one's variable set, and records every environment-scoped
/// occurrence with origin [`VariableOrigin::Library`].
pub async fn collect_library_definitions<P: OctopusApi>(
    api: &P,
    result: &mut AnalysisResult,
    project: &ProjectResource,
) -> Result<()> {
    let libraries = api.library_variable_sets().await?;

    for library in libraries
        .iter()
        .filter(|lib| project.included_library_variable_set_ids.contains(&lib.id))
    {
        debug!("Collecting library definitions from '{}'", library.name);
        let variable_set = api.variable_set(&library.variable_set_id).await?;

        for variable in &variable_set.variables {
            record_scoped(result, variable, VariableOrigin::Library);
        }
    }

    Ok(())
}

/// Record the definitions from the project's own variable set
///
/// Every environment-scoped occurrence is recorded with origin
/// [`VariableOrigin::Project`].
pub async fn collect_project_definitions<P: OctopusApi>(
    api: &P,
    result: &mut AnalysisResult,
    project: &ProjectResource,
) -> Result<()> {
    debug!("Collecting project definitions for '{}'", project.name);
    let variable_set = api.variable_set(&project.variable_set_id).await?;

    for variable in &variable_set.variables {
        record_scoped(result, variable, VariableOrigin::Project);
    }

    Ok(())
}

/// Expand one variable into a definition record per first-scope environment id
fn record_scoped(result: &mut AnalysisResult, variable: &VariableResource, origin: VariableOrigin) {
    for env_id in variable.first_scope_ids() {
        result.record_definition(
            env_id,
            &variable.name,
            variable.value.as_deref().unwrap_or(""),
            origin,
        );
    }
}
