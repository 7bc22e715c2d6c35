//! Configuration manager and `config` subcommand tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tagstore_cli::config::ConfigManager;
use tagstore_core::{DigestAlgorithm, FailurePolicy};
use tempfile::TempDir;

fn create_test_config_manager(temp_dir: &TempDir) -> ConfigManager {
    ConfigManager::with_path(temp_dir.path().join("config.toml"))
}

#[test]
fn test_set_then_get() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    manager.set("tags.failure_policy", "best_effort").unwrap();

    assert!(temp_dir.path().join("config.toml").exists());
    assert_eq!(manager.get("tags.failure_policy").unwrap(), "best_effort");
    assert_eq!(
        manager.load().unwrap().tags.failure_policy,
        FailurePolicy::BestEffort
    );
}

#[test]
fn test_set_preserves_other_values() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    manager.set("tags.digest_algorithm", "sha1").unwrap();
    manager.set("tags.escape_attributes", "false").unwrap();
    manager.set("output.default_format", "json").unwrap();

    let config = manager.load().unwrap();
    assert_eq!(config.tags.digest_algorithm, DigestAlgorithm::Sha1);
    assert!(!config.tags.escape_attributes);
    assert_eq!(config.output.default_format, "json");
}

#[test]
fn test_invalid_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    assert!(manager.set("tags.failure_policy", "sometimes").is_err());
    assert!(manager.set("tags.digest_algorithm", "md5").is_err());
    assert!(manager.set("tags.escape_attributes", "maybe").is_err());
    assert!(manager.set("output.default_format", "csv").is_err());
    assert!(manager.set("network.timeout_seconds", "30").is_err());

    // Nothing was written
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_list_contains_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    let items = manager.list().unwrap();
    let keys: Vec<&str> = items.iter().map(|(k, _)| k.as_str()).collect();

    assert!(keys.contains(&"tags.failure_policy"));
    assert!(keys.contains(&"tags.digest_algorithm"));
    assert!(keys.contains(&"output.default_format"));
    assert!(items.windows(2).all(|w| w[0].0 <= w[1].0));
}

#[test]
fn test_file_values_load() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[tags]\ndigest_algorithm = \"sha1\"\n\n[storage]\ndatabase_path = \"/tmp/custom.db\"\n",
    )
    .unwrap();

    let config = create_test_config_manager(&temp_dir).load().unwrap();
    assert_eq!(config.tags.digest_algorithm, DigestAlgorithm::Sha1);
    assert_eq!(
        config.database_path(),
        std::path::PathBuf::from("/tmp/custom.db")
    );
    // Unset fields keep their defaults
    assert_eq!(config.tags.failure_policy, FailurePolicy::FailFast);
}

#[test]
fn test_unset_database_path_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    let error = manager.get("storage.database_path").unwrap_err();
    assert!(error.to_string().contains("not set"));
}

#[test]
fn test_config_subcommands() {
    let home = TempDir::new().unwrap();
    let config_home = home.path().join("config");

    let mut cmd = Command::cargo_bin("tagstore").unwrap();
    cmd.env("XDG_CONFIG_HOME", &config_home)
        .args(["config", "set", "tags.failure_policy", "best_effort"])
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("tagstore").unwrap();
    cmd.env("XDG_CONFIG_HOME", &config_home)
        .env_remove("TAGSTORE_TAGS__FAILURE_POLICY")
        .args(["config", "get", "tags.failure_policy"])
        .assert()
        .success()
        .stdout("best_effort\n");

    let mut cmd = Command::cargo_bin("tagstore").unwrap();
    cmd.env("XDG_CONFIG_HOME", &config_home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tagstore"))
        .stdout(predicate::str::contains("config.toml"));

    let mut cmd = Command::cargo_bin("tagstore").unwrap();
    cmd.env("XDG_CONFIG_HOME", &config_home)
        .args(["config", "set", "client.chunk_size", "1024"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown configuration key"));
}
