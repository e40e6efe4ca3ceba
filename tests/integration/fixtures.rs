//! Shared test fixtures: an in-memory Octopus provider and config-dir helpers

use anyhow::Result;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;

use octaudit::core::AuditError;
use octaudit::octopus::{
    DeploymentProcessResource, EnvironmentResource, LibraryVariableSetResource, OctopusApi,
    ProjectResource, VariableResource, VariableSetResource,
};

/// In-memory [`OctopusApi`] implementation backed by plain collections
#[derive(Default)]
pub struct InMemoryOctopus {
    pub environments: Vec<EnvironmentResource>,
    pub projects: Vec<ProjectResource>,
    pub processes: HashMap<String, DeploymentProcessResource>,
    pub libraries: Vec<LibraryVariableSetResource>,
    pub variable_sets: HashMap<String, VariableSetResource>,
}

impl OctopusApi for InMemoryOctopus {
    async fn environments(&self) -> Result<Vec<EnvironmentResource>> {
        Ok(self.environments.clone())
    }

    async fn find_project_by_name(&self, name: &str) -> Result<ProjectResource> {
        self.projects.iter().find(|p| p.name == name).cloned().ok_or_else(|| {
            AuditError::ProjectNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    async fn deployment_process(&self, id: &str) -> Result<DeploymentProcessResource> {
        self.processes
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no deployment process '{id}' in fixture"))
    }

    async fn library_variable_sets(&self) -> Result<Vec<LibraryVariableSetResource>> {
        Ok(self.libraries.clone())
    }

    async fn variable_set(&self, id: &str) -> Result<VariableSetResource> {
        self.variable_sets
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no variable set '{id}' in fixture"))
    }
}

/// Build an environment resource
pub fn environment(id: &str, name: &str) -> EnvironmentResource {
    serde_json::from_value(json!({"Id": id, "Name": name})).unwrap()
}

/// Build a project resource with the given library-set attachments
pub fn project(name: &str, libraries: &[&str]) -> ProjectResource {
    serde_json::from_value(json!({
        "Id": format!("Projects-{name}"),
        "Name": name,
        "DeploymentProcessId": format!("deploymentprocess-{name}"),
        "VariableSetId": format!("variableset-{name}"),
        "IncludedLibraryVariableSetIds": libraries,
    }))
    .unwrap()
}

/// Build a one-step, one-action deployment process from action properties
pub fn single_action_process(
    step_name: &str,
    action_name: &str,
    action_properties: &[(&str, &str)],
) -> DeploymentProcessResource {
    let properties: serde_json::Map<String, serde_json::Value> = action_properties
        .iter()
        .map(|(k, v)| ((*k).to_string(), json!(v)))
        .collect();

    serde_json::from_value(json!({
        "Steps": [{
            "Name": step_name,
            "Properties": {},
            "Actions": [{"Name": action_name, "Properties": properties}],
        }]
    }))
    .unwrap()
}

/// Build a variable scoped to the given environment ids
pub fn scoped_variable(name: &str, value: &str, env_ids: &[&str]) -> VariableResource {
    serde_json::from_value(json!({
        "Name": name,
        "Value": value,
        "Scope": {"Environment": env_ids},
    }))
    .unwrap()
}

/// Build a variable set from variables
pub fn variable_set(variables: Vec<VariableResource>) -> VariableSetResource {
    VariableSetResource { variables }
}

/// Write the two conventional config files into `dir`
pub fn write_config_files(dir: &Path, release_config: &str, web_config: &str) {
    std::fs::write(dir.join("Web.Release.config"), release_config).unwrap();
    std::fs::write(dir.join("Web.config"), web_config).unwrap();
}

/// The standard release config used by the end-to-end scenarios
pub const RELEASE_CONFIG: &str = r##"<configuration>
  <connectionStrings>
    <add name="Main" connectionString="#{Db.Connection}" xdt:Transform="SetAttributes"/>
  </connectionStrings>
  <cache ttl="#{Cache.Ttl}"/>
</configuration>"##;

/// The standard Web.config used by the end-to-end scenarios
pub const WEB_CONFIG: &str = r#"<configuration>
  <appSettings>
    <add key="FeatureFlag" value="true"/>
  </appSettings>
</configuration>"#;
