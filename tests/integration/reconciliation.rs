//! End-to-end reconciliation scenarios against the in-memory provider

use tempfile::TempDir;

use octaudit::analysis::{Analyzer, UsageKind};
use octaudit::core::AuditError;

use super::fixtures::*;

/// The scenario shared by the tests below:
/// - one step with action property `ConnectionString = #{Db.Connection}`
/// - release config referencing `#{Db.Connection}` and `#{Cache.Ttl}`
/// - appSettings key `FeatureFlag`
/// - Prod (Environments-1) defines `Db.Connection` (project-owned)
/// - Staging (Environments-2) defines nothing
fn standard_octopus() -> InMemoryOctopus {
    let mut octopus = InMemoryOctopus {
        environments: vec![
            environment("Environments-1", "Prod"),
            environment("Environments-2", "Staging"),
        ],
        projects: vec![project("Billing", &[])],
        ..InMemoryOctopus::default()
    };

    octopus.processes.insert(
        "deploymentprocess-Billing".to_string(),
        single_action_process(
            "Deploy web",
            "Deploy package",
            &[("ConnectionString", "#{Db.Connection}")],
        ),
    );
    octopus.variable_sets.insert(
        "variableset-Billing".to_string(),
        variable_set(vec![scoped_variable(
            "Db.Connection",
            "Server=prod-sql",
            &["Environments-1"],
        )]),
    );

    octopus
}

fn config_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_config_files(dir.path(), RELEASE_CONFIG, WEB_CONFIG);
    dir
}

#[tokio::test]
async fn configured_environment_reports_only_undefined_substitutions() {
    let dir = config_dir();
    let analyzer = Analyzer::new(standard_octopus());

    let result = analyzer.analyze("Billing", dir.path()).await.unwrap();

    // Db.Connection is defined for Prod; FeatureFlag is appSettings-only
    let missing: Vec<&str> = result
        .missing_for_environment("Environments-1")
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(missing, vec!["Cache.Ttl"]);

    assert!(result.unused_for_environment("Environments-1").is_empty());
}

#[tokio::test]
async fn unconfigured_environment_reports_all_used_variables() {
    let dir = config_dir();
    let analyzer = Analyzer::new(standard_octopus());

    let result = analyzer.analyze("Billing", dir.path()).await.unwrap();

    let missing: Vec<&str> = result
        .missing_for_environment("Environments-2")
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    // FeatureFlag is still excluded as appSettings-only usage
    assert_eq!(missing, vec!["Db.Connection", "Cache.Ttl"]);

    assert!(result.unused_for_environment("Environments-2").is_empty());
}

#[tokio::test]
async fn project_owned_definition_without_usage_is_reported_unused() {
    let dir = config_dir();
    let mut octopus = standard_octopus();
    octopus
        .variable_sets
        .get_mut("variableset-Billing")
        .unwrap()
        .variables
        .push(scoped_variable("Unused.Var", "dead", &["Environments-1"]));

    let analyzer = Analyzer::new(octopus);
    let result = analyzer.analyze("Billing", dir.path()).await.unwrap();

    assert_eq!(result.unused_for_environment("Environments-1"), vec!["Unused.Var"]);
}

#[tokio::test]
async fn library_definitions_count_as_defined_but_never_unused() {
    let dir = config_dir();
    let mut octopus = standard_octopus();
    octopus.projects = vec![project("Billing", &["LibraryVariableSets-1"])];
    octopus.libraries = vec![serde_json::from_value(serde_json::json!({
        "Id": "LibraryVariableSets-1",
        "Name": "Shared",
        "VariableSetId": "variableset-Shared",
    }))
    .unwrap()];
    octopus.variable_sets.insert(
        "variableset-Shared".to_string(),
        variable_set(vec![
            scoped_variable("Cache.Ttl", "300", &["Environments-1"]),
            scoped_variable("Lib.Only", "x", &["Environments-1"]),
        ]),
    );

    let analyzer = Analyzer::new(octopus);
    let result = analyzer.analyze("Billing", dir.path()).await.unwrap();

    // Cache.Ttl is now library-defined for Prod, so nothing is missing there
    assert!(result.missing_for_environment("Environments-1").is_empty());
    // Lib.Only is unreferenced but library-owned: never reported unused
    assert!(result.unused_for_environment("Environments-1").is_empty());
}

#[tokio::test]
async fn system_variables_are_never_missing() {
    let dir = config_dir();
    let mut octopus = standard_octopus();
    octopus.processes.insert(
        "deploymentprocess-Billing".to_string(),
        single_action_process(
            "Deploy web",
            "Deploy package",
            &[
                ("ConnectionString", "#{Db.Connection}"),
                ("PackageName", "#{Octopus.Action.Name}"),
            ],
        ),
    );

    let analyzer = Analyzer::new(octopus);
    let result = analyzer.analyze("Billing", dir.path()).await.unwrap();

    for env in ["Environments-1", "Environments-2", "Environments-99"] {
        assert!(
            !result
                .missing_for_environment(env)
                .iter()
                .any(|v| v.name == "Octopus.Action.Name"),
            "Octopus.Action.Name reported missing for {env}"
        );
    }
}

#[tokio::test]
async fn usage_masks_and_contexts_accumulate_across_sources() {
    let dir = config_dir();
    let analyzer = Analyzer::new(standard_octopus());

    let result = analyzer.analyze("Billing", dir.path()).await.unwrap();

    let db = result
        .used_variables()
        .iter()
        .find(|v| v.name == "Db.Connection")
        .unwrap();
    // Referenced from an action property and from the release config
    assert_eq!(db.usage, UsageKind::ACTION_PROPERTY | UsageKind::CONFIG_FILE);
    assert_eq!(db.contexts.len(), 2);
    assert!(db.contexts.contains(&"on action Deploy package".to_string()));
    assert!(db.contexts.contains(&"Web.Release.config".to_string()));
}

#[tokio::test]
async fn unknown_project_fails_with_lookup_error() {
    let dir = config_dir();
    let analyzer = Analyzer::new(standard_octopus());

    let err = analyzer.analyze("Nonexistent", dir.path()).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AuditError>(),
        Some(AuditError::ProjectNotFound { name }) if name == "Nonexistent"
    ));
}

#[tokio::test]
async fn missing_release_config_aborts_the_project() {
    let dir = TempDir::new().unwrap();
    // Only Web.config present
    std::fs::write(dir.path().join("Web.config"), WEB_CONFIG).unwrap();

    let analyzer = Analyzer::new(standard_octopus());
    let err = analyzer.analyze("Billing", dir.path()).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AuditError>(),
        Some(AuditError::ConfigFileRead { .. })
    ));
}

#[tokio::test]
async fn malformed_web_config_aborts_the_project() {
    let dir = TempDir::new().unwrap();
    write_config_files(dir.path(), RELEASE_CONFIG, "<configuration><appSettings>");

    let analyzer = Analyzer::new(standard_octopus());
    let err = analyzer.analyze("Billing", dir.path()).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AuditError>(),
        Some(AuditError::AppSettingsParse { .. })
    ));
}
