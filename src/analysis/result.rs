//! Per-project analysis accumulator and reconciliation queries
//!
//! [`AnalysisResult`] is the shared result object one project's audit fills:
//! the usage collectors merge referenced variables into it, the definition
//! collectors append per-environment definition records, and the
//! reconciliation queries ([`AnalysisResult::missing_for_environment`],
//! [`AnalysisResult::unused_for_environment`]) read it back out. One instance
//! lives per project analysis and is discarded afterwards - nothing is shared
//! across projects.

use bitflags::bitflags;

/// Variable names starting with this prefix are platform-injected system
/// variables and always considered implicitly defined.
pub const RESERVED_PREFIX: &str = "Octopus.";

bitflags! {
    /// Where a variable reference was observed
    ///
    /// A variable referenced from several places carries the union of the
    /// kinds. The mask only ever grows; collectors OR new observations in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UsageKind: u8 {
        /// Placeholder in the release configuration file
        const CONFIG_FILE = 1;
        /// Placeholder in a step-level property
        const STEP_PROPERTY = 1 << 1;
        /// Placeholder in an action-level property
        const ACTION_PROPERTY = 1 << 2;
        /// Key listed in the appSettings section of the settings file
        const APP_SETTINGS = 1 << 3;
    }
}

/// A variable referenced somewhere in the project's deployment surface
#[derive(Debug, Clone)]
pub struct UsedVariable {
    /// Variable name; unique key within one analysis
    pub name: String,
    /// Union of every usage kind observed for this name
    pub usage: UsageKind,
    /// Free-text usage-site descriptions, append-only, duplicates allowed
    pub contexts: Vec<String>,
}

/// Where a variable definition comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableOrigin {
    /// Declared in the project's own variable set
    Project,
    /// Inherited from a library variable set attached to the project
    Library,
}

/// A variable defined for one environment
///
/// Immutable once recorded. The same name may appear several times for one
/// environment (multiple scopes, multiple library sets); occurrences are
/// never merged or deduplicated.
#[derive(Debug, Clone)]
pub struct DefinedVariable {
    /// Variable name
    pub name: String,
    /// Raw value; may itself contain placeholders, which are not resolved
    pub value: String,
    /// Project-owned or library-owned
    pub origin: VariableOrigin,
}

/// A deployment environment known to the server
#[derive(Debug, Clone)]
pub struct Environment {
    /// Server-assigned id
    pub id: String,
    /// Display name
    pub name: String,
}

/// Everything one project's audit learned, and the reconciliation over it
#[derive(Debug, Default)]
pub struct AnalysisResult {
    /// Referenced variables in first-observation order, keyed by name
    used: Vec<UsedVariable>,
    /// Definition records per environment id, in registration order
    defined: std::collections::HashMap<String, Vec<DefinedVariable>>,
    /// Environments in server order; loaded once, read-only afterwards
    environments: Vec<Environment>,
}

impl AnalysisResult {
    /// Create an empty result for a fresh project analysis
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the environment id→name listing for this run
    pub fn set_environments(&mut self, environments: Vec<Environment>) {
        self.environments = environments;
    }

    /// Environments in server order
    #[must_use]
    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    /// Display name for an environment id, when known
    #[must_use]
    pub fn environment_name(&self, env_id: &str) -> Option<&str> {
        self.environments.iter().find(|e| e.id == env_id).map(|e| e.name.as_str())
    }

    /// Register one observation of a referenced variable
    ///
    /// Merge-on-insert: a name seen before gets `kind` ORed into its mask and
    /// the context appended (even when the same context repeats); a new name
    /// gets a fresh entry. Entries are never removed within a run.
    pub fn record_usage(&mut self, name: &str, kind: UsageKind, context: impl Into<String>) {
        if let Some(existing) = self.used.iter_mut().find(|v| v.name == name) {
            existing.usage |= kind;
            existing.contexts.push(context.into());
        } else {
            self.used.push(UsedVariable {
                name: name.to_string(),
                usage: kind,
                contexts: vec![context.into()],
            });
        }
    }

    /// Register a variable defined for an environment
    ///
    /// Every scope and library occurrence produces a distinct record; no
    /// deduplication by name or value.
    pub fn record_definition(
        &mut self,
        env_id: &str,
        name: impl Into<String>,
        value: impl Into<String>,
        origin: VariableOrigin,
    ) {
        self.defined.entry(env_id.to_string()).or_default().push(DefinedVariable {
            name: name.into(),
            value: value.into(),
            origin,
        });
    }

    /// All referenced variables in first-observation order
    #[must_use]
    pub fn used_variables(&self) -> &[UsedVariable] {
        &self.used
    }

    /// Definition records for an environment, if any were collected
    #[must_use]
    pub fn defined_variables(&self, env_id: &str) -> Option<&[DefinedVariable]> {
        self.defined.get(env_id).map(Vec::as_slice)
    }

    /// Variables used by the project but not defined for `env_id`
    ///
    /// An environment with no definition bucket at all is treated as fully
    /// unconfigured: every used variable is missing. Two exclusions always
    /// apply:
    /// - names starting with `Octopus.` (system variables, implicitly defined)
    /// - variables whose usage is exactly [`UsageKind::APP_SETTINGS`]
    ///   (settings-only keys are optional configuration, not a deploy-time
    ///   substitution requirement)
    #[must_use]
    pub fn missing_for_environment(&self, env_id: &str) -> Vec<&UsedVariable> {
        let defined = self.defined.get(env_id);

        self.used
            .iter()
            .filter(|uv| !uv.name.starts_with(RESERVED_PREFIX))
            .filter(|uv| uv.usage != UsageKind::APP_SETTINGS)
            .filter(|uv| match defined {
                Some(bucket) => !bucket.iter().any(|dv| dv.name == uv.name),
                None => true,
            })
            .collect()
    }

    /// Names defined for `env_id` by the project itself but never referenced
    ///
    /// Library-origin definitions are excluded: a library set may serve other
    /// projects, so an unreferenced library variable is not evidence of dead
    /// configuration. An environment with no definition bucket yields nothing.
    #[must_use]
    pub fn unused_for_environment(&self, env_id: &str) -> Vec<&str> {
        let Some(bucket) = self.defined.get(env_id) else {
            return Vec::new();
        };

        bucket
            .iter()
            .filter(|dv| dv.origin == VariableOrigin::Project)
            .filter(|dv| !self.used.iter().any(|uv| uv.name == dv.name))
            .map(|dv| dv.name.as_str())
            .collect()
    }
}
