use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn get_waypost_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("waypost")
}

#[test]
fn test_config_path_flag() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.json");

    let mut cmd = Command::new(get_waypost_bin());
    cmd.arg("config-path").arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(config.display().to_string()));
}

#[test]
fn test_config_path_from_env() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("from-env.json");

    let mut cmd = Command::new(get_waypost_bin());
    cmd.env("WAYPOST_CONFIG", &config).arg("config-path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("from-env.json"));
}

#[test]
fn test_settings_shows_configuration() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{
            "browsers": [{ "id": "work", "name": "Chrome Work", "executable": "/usr/bin/chrome" }],
            "rules": [{ "pattern": "^https://intranet\\.", "patternType": "regex", "profiles": ["work"] }]
        }"#,
    )
    .unwrap();

    let mut cmd = Command::new(get_waypost_bin());
    cmd.arg("--settings").arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Waypost settings"))
        .stdout(predicate::str::contains("Chrome Work"))
        .stdout(predicate::str::contains("regex"))
        .stdout(predicate::str::contains("-> work"));
}

#[test]
fn test_idle_with_empty_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    let mut cmd = Command::new(get_waypost_bin());
    cmd.arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(none)"))
        .stdout(predicate::str::contains("waypost <URL>"));

    assert!(!config.exists());
}

#[test]
fn test_settings_reports_corrupt_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, "[1, 2").unwrap();

    let mut cmd = Command::new(get_waypost_bin());
    cmd.arg("--settings").arg("--config").arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_route_json_output() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{
            "browsers": [
                { "id": "work", "name": "Work", "executable": "/usr/bin/chrome" },
                { "id": "home", "name": "Home", "executable": "/usr/bin/firefox" }
            ],
            "rules": [{ "pattern": "example.com", "profiles": ["home"] }]
        }"#,
    )
    .unwrap();

    let mut cmd = Command::new(get_waypost_bin());
    cmd.args(["route", "HTTPS://Sub.Example.com/", "--format", "json", "--config"])
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"normalized\": \"https://sub.example.com\""))
        .stdout(predicate::str::contains("\"decision\": \"launch\""))
        .stdout(predicate::str::contains("\"home\""));
}

#[test]
fn test_completion_bash_generates_script() {
    let mut cmd = Command::new(get_waypost_bin());
    cmd.arg("completion").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_waypost()"))
        .stdout(predicate::str::contains("complete -F _waypost"));
}

#[test]
fn test_completion_invalid_shell() {
    let mut cmd = Command::new(get_waypost_bin());
    cmd.arg("completion").arg("tcsh");

    cmd.assert().failure();
}
