//! Usage collection: where does the project reference variables?
//!
//! Three sources feed the used-variable side of the reconciliation:
//!
//! 1. The deployment process - placeholders in step-level and action-level
//!    property values.
//! 2. The release configuration file (`Web.Release.config`) - placeholders
//!    anywhere in its text.
//! 3. The settings file (`Web.config`) - the `key` attributes under
//!    `configuration/appSettings`, taken literally (the key itself is the
//!    variable name, no placeholder syntax involved).
//!
//! File problems are fatal to the current project's analysis: a partial usage
//! picture would make the reconciliation report lie, so the caller discards
//! the accumulator on error.

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use super::placeholder::placeholders;
use super::result::{AnalysisResult, UsageKind};
use crate::core::AuditError;
use crate::octopus::DeploymentProcessResource;

/// Release configuration file expected in each project's config directory
pub const RELEASE_CONFIG_FILE: &str = "Web.Release.config";

/// Settings file expected in each project's config directory
pub const APP_SETTINGS_FILE: &str = "Web.config";

/// Register every placeholder referenced from the deployment process
///
/// Action-level properties are walked first (usage kind
/// [`UsageKind::ACTION_PROPERTY`], context `on action <name>`), then
/// step-level properties ([`UsageKind::STEP_PROPERTY`], context
/// `on step <name>`). Steps and actions without properties are skipped.
pub fn collect_step_usage(result: &mut AnalysisResult, process: &DeploymentProcessResource) {
    for step in &process.steps {
        for action in &step.actions {
            for property in action.properties.values() {
                for name in placeholders(property.text()) {
                    result.record_usage(
                        name,
                        UsageKind::ACTION_PROPERTY,
                        format!("on action {}", action.name),
                    );
                }
            }
        }

        for property in step.properties.values() {
            for name in placeholders(property.text()) {
                result.record_usage(
                    name,
                    UsageKind::STEP_PROPERTY,
                    format!("on step {}", step.name),
                );
            }
        }
    }
}

/// Register every placeholder in the release configuration file
///
/// Reads `<config_dir>/Web.Release.config` as UTF-8 text and extracts all
/// placeholders, each with usage kind [`UsageKind::CONFIG_FILE`] and the file
/// name as context.
///
/// # Errors
///
/// [`AuditError::ConfigFileRead`] when the file is missing or unreadable.
pub fn collect_release_config(result: &mut AnalysisResult, config_dir: &Path) -> Result<()> {
    let path = config_dir.join(RELEASE_CONFIG_FILE);
    debug!("Scanning release config: {}", path.display());

    let content = std::fs::read_to_string(&path).map_err(|source| AuditError::ConfigFileRead {
        path: path.display().to_string(),
        source,
    })?;

    for name in placeholders(&content) {
        result.record_usage(name, UsageKind::CONFIG_FILE, RELEASE_CONFIG_FILE);
    }

    Ok(())
}

/// Register every appSettings key in the settings file
///
/// Parses `<config_dir>/Web.config` as XML, locates the
/// `configuration/appSettings` section and registers the non-empty `key`
/// attribute of each child element with usage kind
/// [`UsageKind::APP_SETTINGS`]. The key text is the variable name as-is;
/// placeholder extraction does not apply here.
///
/// # Errors
///
/// - [`AuditError::ConfigFileRead`] when the file is missing or unreadable
/// - [`AuditError::AppSettingsParse`] when the document is not well-formed
///   XML or has no appSettings section under the configuration root
pub fn collect_app_settings(result: &mut AnalysisResult, config_dir: &Path) -> Result<()> {
    let path = config_dir.join(APP_SETTINGS_FILE);
    debug!("Scanning app settings: {}", path.display());

    let content = std::fs::read_to_string(&path).map_err(|source| AuditError::ConfigFileRead {
        path: path.display().to_string(),
        source,
    })?;

    let document = roxmltree::Document::parse(&content).map_err(|e| AuditError::AppSettingsParse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let app_settings = document
        .root_element()
        .children()
        .find(|node| node.has_tag_name("appSettings"))
        .ok_or_else(|| AuditError::AppSettingsParse {
            path: path.display().to_string(),
            reason: "no configuration/appSettings section".to_string(),
        })?;

    for entry in app_settings.children().filter(roxmltree::Node::is_element) {
        match entry.attribute("key") {
            Some(key) if !key.is_empty() => {
                result.record_usage(key, UsageKind::APP_SETTINGS, "AppSettings");
            }
            _ => {}
        }
    }

    Ok(())
}
