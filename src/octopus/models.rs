//! Serde models for the Octopus Deploy REST resources octaudit consumes
//!
//! Only the fields the audit actually reads are modeled; everything else in
//! the server's JSON is ignored. Field names follow the server's PascalCase
//! convention via `rename_all`.

use serde::Deserialize;

/// An Octopus project as returned by `/api/projects/all`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectResource {
    /// Server-assigned id, e.g. `Projects-42`
    pub id: String,
    /// Human-readable project name (the lookup key octaudit uses)
    pub name: String,
    /// Id of the project's deployment process resource
    pub deployment_process_id: String,
    /// Id of the project's own variable set
    pub variable_set_id: String,
    /// Ids of the library variable sets attached to this project
    #[serde(default)]
    pub included_library_variable_set_ids: Vec<String>,
}

/// A deployment process: the ordered list of steps for a project
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentProcessResource {
    /// Deployment steps in execution order
    #[serde(default)]
    pub steps: Vec<StepResource>,
}

/// One step of a deployment process
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StepResource {
    /// Step display name, used in usage-context strings
    pub name: String,
    /// Step-level properties (not scoped to an action)
    #[serde(default)]
    pub properties: std::collections::HashMap<String, PropertyValue>,
    /// Actions executed by this step
    #[serde(default)]
    pub actions: Vec<ActionResource>,
}

/// One action within a deployment step
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActionResource {
    /// Action display name, used in usage-context strings
    pub name: String,
    /// Action-level properties
    #[serde(default)]
    pub properties: std::collections::HashMap<String, PropertyValue>,
}

/// A step or action property value
///
/// The server serializes properties either as a bare string or as an object
/// `{"Value": ..., "IsSensitive": ...}`. Both forms flatten to a string here;
/// sensitive properties with a null value read as empty text (they cannot
/// reference placeholders the audit could see anyway).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Plain string property
    Plain(String),
    /// Object form carrying a value and a sensitivity marker
    Tagged {
        #[serde(rename = "Value")]
        value: Option<String>,
        #[serde(rename = "IsSensitive", default)]
        is_sensitive: bool,
    },
}

impl PropertyValue {
    /// The textual value of the property, empty for null sensitive values
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Tagged { value, .. } => value.as_deref().unwrap_or(""),
        }
    }
}

/// A library variable set attachable to multiple projects
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LibraryVariableSetResource {
    /// Server-assigned id, e.g. `LibraryVariableSets-3`
    pub id: String,
    /// Display name of the library set
    pub name: String,
    /// Id of the variable set holding this library's variables
    pub variable_set_id: String,
}

/// The variables of a project or library variable set
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariableSetResource {
    /// The variable definitions in declaration order
    #[serde(default)]
    pub variables: Vec<VariableResource>,
}

/// One variable definition with its scope dimensions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariableResource {
    /// Variable name (not unique within a set: the same name may be declared
    /// once per scope)
    pub name: String,
    /// Raw value; may itself contain `#{...}` placeholders, which are never
    /// resolved by the audit
    #[serde(default)]
    pub value: Option<String>,
    /// Scope dimensions as sent by the server, e.g.
    /// `{"Environment": ["Environments-1"], "Role": ["web"]}`. Document order
    /// is preserved (`serde_json` `preserve_order`).
    #[serde(default)]
    pub scope: serde_json::Map<String, serde_json::Value>,
}

impl VariableResource {
    /// Ids listed under the variable's *first* scope dimension
    ///
    /// Fixed policy: only the first scope dimension in document order is
    /// consulted, and it is assumed to be the environment dimension. A
    /// variable whose first dimension is something else (machine, role) has
    /// those ids attributed as environments; an unscoped variable yields
    /// nothing and is effectively dropped from the per-environment buckets.
    #[must_use]
    pub fn first_scope_ids(&self) -> Vec<&str> {
        self.scope
            .values()
            .next()
            .and_then(serde_json::Value::as_array)
            .map(|ids| ids.iter().filter_map(serde_json::Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// A deployment environment as returned by `/api/environments/all`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentResource {
    /// Server-assigned id, e.g. `Environments-1`
    pub id: String,
    /// Display name, e.g. `Production`
    pub name: String,
}
