//! End-to-end tests for the hub-post binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the user's configuration and credentials
fn hub_post(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hub-post").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env_remove("SOCIALHUB_CONFIG")
        .env_remove("SOCIALHUB_ACCOUNT")
        .env_remove("SOCIALHUB_API_KEY")
        .env_remove("SOCIALHUB_API_SECRET")
        .env_remove("SOCIALHUB_ACCESS_TOKEN")
        .env_remove("SOCIALHUB_REFRESH_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_documents_flags_and_exit_codes() {
    let home = TempDir::new().unwrap();

    hub_post(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--schedule-in"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("EXIT CODES"))
        .stdout(predicate::str::contains("--stats"))
        .stdout(predicate::str::contains("--api-key").not())
        .stdout(predicate::str::contains("--access-token").not());
}

#[test]
fn test_text_post_in_development() {
    let home = TempDir::new().unwrap();

    hub_post(&home)
        .arg("Launching today!")
        .assert()
        .success()
        .stdout(predicate::str::contains("Twitter:tw_"))
        .stdout(predicate::str::contains("[published]"))
        .stderr(predicate::str::contains("Instagram:"))
        .stderr(predicate::str::contains("TikTok:"));
}

#[test]
fn test_json_output() {
    let home = TempDir::new().unwrap();

    let output = hub_post(&home)
        .args(["Hello", "--format", "json", "--seed", "7"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["overall_success"], true);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert!(results
        .iter()
        .any(|r| r["platform"] == "Twitter" && r["success"] == true));
}

#[test]
fn test_empty_content_is_invalid_input() {
    let home = TempDir::new().unwrap();

    hub_post(&home)
        .arg("   ")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Content cannot be empty"));
}

#[test]
fn test_rejected_credentials() {
    let home = TempDir::new().unwrap();

    hub_post(&home)
        .args(["Hello", "--api-key=", "--api-secret=", "--access-token="])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_environment() {
    let home = TempDir::new().unwrap();

    hub_post(&home)
        .args(["Hello", "--env", "qa"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Environment not configured"));
}

#[test]
fn test_every_platform_rejects() {
    let home = TempDir::new().unwrap();

    // Instagram needs media
    hub_post(&home)
        .args(["Hello", "--platform", "ig"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("media"));
}

#[test]
fn test_schedule_in() {
    let home = TempDir::new().unwrap();

    hub_post(&home)
        .args(["Later", "-p", "twitter", "--env", "staging", "--schedule-in", "2h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scheduled_tw_"))
        .stdout(predicate::str::contains("https://twitter.com/scheduled"));
}

#[test]
fn test_config_file() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("custom.toml");
    fs::write(
        &config_path,
        r#"
environment = "qa"

[environments.qa.linkedin]
auth = "oauth2"
publish = "immediate"
"#,
    )
    .unwrap();

    hub_post(&home)
        .arg("Hiring!")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("LinkedIn:li_"));
}

#[test]
fn test_stdin_content() {
    let home = TempDir::new().unwrap();

    hub_post(&home)
        .args(["-p", "x"])
        .write_stdin("From a pipe\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Twitter:"));
}

/// Counters of the first statistics entry, without the random publication id
fn seeded_counters(home: &TempDir, seed: &str) -> serde_json::Value {
    let output = hub_post(home)
        .args(["Hello", "-p", "twitter", "--seed", seed, "--stats", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let statistics = json["statistics"].as_array().unwrap();
    assert_eq!(statistics.len(), 1);
    assert_eq!(statistics[0]["platform"], "Twitter");

    let entry = &statistics[0]["statistics"][0];
    serde_json::json!([
        entry["views"],
        entry["likes"],
        entry["shares"],
        entry["comments"],
        entry["engagement_rate"],
    ])
}

#[test]
fn test_seeded_stats_are_reproducible() {
    let home = TempDir::new().unwrap();

    let first = seeded_counters(&home, "7");
    let second = seeded_counters(&home, "7");
    assert!(first[0].is_u64());
    assert_eq!(first, second);
}

#[test]
fn test_stats_text_output() {
    let home = TempDir::new().unwrap();

    hub_post(&home)
        .args(["Hello", "-p", "twitter", "--seed", "1", "--stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Twitter tw_"))
        .stdout(predicate::str::contains("views="))
        .stdout(predicate::str::contains("engagement="));
}

#[test]
fn test_json_without_stats_has_no_statistics() {
    let home = TempDir::new().unwrap();

    let output = hub_post(&home)
        .args(["Hello", "-p", "twitter", "--format", "json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json.get("statistics").is_none());
}
