//! Binary-level argument and startup-error checks

use assert_cmd::Command;
use predicates::prelude::*;

fn octaudit() -> Command {
    let mut cmd = Command::cargo_bin("octaudit").unwrap();
    // Isolate from the developer's real config and credentials
    cmd.env_remove("OCTOPUS_URL");
    cmd.env_remove("OCTOPUS_API_KEY");
    cmd
}

#[test]
fn help_lists_the_check_subcommand() {
    octaudit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"));
}

#[test]
fn project_name_without_config_dir_fails() {
    let empty_config = tempfile::NamedTempFile::new().unwrap();

    octaudit()
        .args(["--config", empty_config.path().to_str().unwrap()])
        .args(["check", "--project-name", "Billing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--config-dir"));
}

#[test]
fn missing_credentials_fail_before_any_analysis() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[[projects]]\nname = \"Billing\"\nconfig_dir = \"/tmp\"\n").unwrap();

    octaudit()
        .args(["--config", config.to_str().unwrap(), "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("server URL"));
}

#[test]
fn empty_project_list_exits_cleanly() {
    let empty_config = tempfile::NamedTempFile::new().unwrap();

    octaudit()
        .args(["--config", empty_config.path().to_str().unwrap(), "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No project to audit"));
}

#[test]
fn unreadable_config_file_is_a_startup_error() {
    octaudit()
        .args(["--config", "/nonexistent/octaudit.toml", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}
