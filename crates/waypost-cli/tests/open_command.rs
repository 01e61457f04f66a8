use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn get_waypost_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("waypost")
}

fn waypost(config: &Path) -> Command {
    let mut cmd = Command::new(get_waypost_bin());
    cmd.env_remove("WAYPOST_CONFIG").arg("--config").arg(config);
    cmd
}

fn rule_count(config: &Path) -> usize {
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(config).unwrap()).unwrap();
    saved["rules"].as_array().unwrap().len()
}

fn write_config(dir: &TempDir, json: &str) -> PathBuf {
    let config = dir.path().join("config.json");
    std::fs::write(&config, json).unwrap();
    config
}

const TWO_PROFILES: &str = r#"{
    "browsers": [
        {
            "id": "work",
            "name": "Chrome Work",
            "executable": "/usr/bin/chrome",
            "args": ["--profile-directory=Profile 1"]
        },
        { "id": "home", "name": "Firefox Home", "executable": "/usr/bin/firefox", "args": ["-P", "home"] }
    ],
    "rules": [
        { "pattern": "github.com", "patternType": "domain", "profiles": ["work"] },
        { "pattern": "https://docs.", "patternType": "prefix", "profiles": ["work", "home"] }
    ]
}"#;

#[test]
fn test_help() {
    let mut cmd = Command::new(get_waypost_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("browser profile"))
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("rule"))
        .stdout(predicate::str::contains("route"))
        .stdout(predicate::str::contains("--settings"));
}

#[test]
fn test_single_match_launches_quoted_command() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, TWO_PROFILES);

    waypost(&config)
        .args(["https://github.com/rust-lang/rust/", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "/usr/bin/chrome \"--profile-directory=Profile 1\" https://github.com/rust-lang/rust/",
        ));
}

#[test]
fn test_picker_choice_is_remembered() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, TWO_PROFILES);

    waypost(&config)
        .args(["https://example.org/page", "--dry-run"])
        .write_stdin("2+\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("/usr/bin/firefox -P home https://example.org/page"))
        .stderr(predicate::str::contains("Chrome Work"))
        .stderr(predicate::str::contains("Firefox Home"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    let rules = saved["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[2]["pattern"], "example.org");
    assert_eq!(rules[2]["patternType"], "domain");
    assert_eq!(rules[2]["profiles"][0], "home");

    // The remembered rule now decides on its own
    waypost(&config)
        .args(["https://example.org/other", "--dry-run"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("/usr/bin/firefox -P home https://example.org/other"));
}

#[test]
fn test_picker_offers_only_matched_profiles() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, TWO_PROFILES);

    waypost(&config)
        .args(["https://docs.rs/tokio", "--dry-run"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("/usr/bin/chrome"));
}

#[test]
fn test_picker_cancel_opens_nothing() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, TWO_PROFILES);
    let before = std::fs::read_to_string(&config).unwrap();

    waypost(&config)
        .args(["https://example.org", "--dry-run"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(std::fs::read_to_string(&config).unwrap(), before);
}

#[test]
fn test_picker_without_terminal_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, TWO_PROFILES);

    waypost(&config)
        .args(["https://example.org", "--dry-run"])
        .write_stdin("")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Cannot ask which profile to use"));
}

#[test]
fn test_remember_save_failure_still_launches() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, TWO_PROFILES);
    // The config is written through a sibling temp file; a directory in its
    // place makes every save fail
    std::fs::create_dir(dir.path().join("config.json.tmp")).unwrap();

    waypost(&config)
        .args(["https://example.org/page", "--dry-run"])
        .write_stdin("1+\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("/usr/bin/chrome"))
        .stdout(predicate::str::contains("https://example.org/page"))
        .stderr(predicate::str::contains("Failed to save remembered rule"));

    assert_eq!(rule_count(&config), 2);
}

#[test]
fn test_remember_under_shared_rule_is_not_repeated() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, TWO_PROFILES);

    for _ in 0..3 {
        waypost(&config)
            .args(["https://docs.rs/tokio", "--dry-run"])
            .write_stdin("2+\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("/usr/bin/firefox"))
            .stderr(predicate::str::contains("Other rules also match"));
    }

    assert_eq!(rule_count(&config), 3);
}

#[test]
fn test_no_profiles_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    waypost(&config)
        .arg("https://example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No browser profiles configured"))
        .stderr(predicate::str::contains("waypost profile detect"));
}

#[test]
fn test_non_web_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, TWO_PROFILES);

    waypost(&config)
        .arg("ftp://example.com/file")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not an http:// or https:// URL"));
}

#[test]
fn test_launch_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no-such-browser");
    let json = format!(
        r#"{{ "browsers": [{{ "id": "gone", "name": "Gone", "executable": {} }}] }}"#,
        serde_json::to_string(&missing.display().to_string()).unwrap()
    );
    let config = write_config(&dir, &json);

    waypost(&config)
        .args(["route", "https://example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ask between gone"));

    waypost(&config)
        .arg("https://example.com")
        .write_stdin("1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to launch Gone"));
}

#[test]
fn test_corrupt_config_still_routes() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "{ not json");

    waypost(&config)
        .arg("https://example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No browser profiles configured"));
}

#[test]
fn test_url_conflicts_with_settings() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, TWO_PROFILES);

    waypost(&config)
        .args(["https://example.com", "--settings"])
        .assert()
        .failure();
}

#[test]
fn test_dry_run_requires_url() {
    let mut cmd = Command::new(get_waypost_bin());
    cmd.arg("--dry-run");

    cmd.assert().failure();
}
