//! Tests for config functionality.

use crate::config::operations::{coerce_bool, coerce_list};
use crate::config::{Config, LogLevel, SyncStrategy};
use crate::error::GitHelperError;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.default_base, "dev");
    assert_eq!(config.sync_strategy, SyncStrategy::Rebase);
    assert_eq!(config.remote_name, "origin");
    assert!(config.enforce_prefix);
    assert_eq!(
        config.allowed_prefixes,
        vec!["feature/", "bugfix/", "hotfix/"]
    );
    assert_eq!(config.protect, vec!["main", "dev"]);
    assert!(config.confirm_on_prune);
    assert!(!config.confirm_on_sync);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.auto_stash);
    assert!(!config.restore_stash_on_failure);
    assert!(config.pre_commit_command.is_none());
}

#[test]
fn test_empty_object_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_only_log_level_leaves_other_fields_at_defaults() {
    let config = Config::from_json(r#"{"logLevel": "debug"}"#).unwrap();

    let expected = Config {
        log_level: LogLevel::Debug,
        ..Config::default()
    };
    assert_eq!(config, expected);
}

#[test]
fn test_full_config() {
    let json = r#"
{
  "defaultBase": "develop",
  "syncStrategy": "merge",
  "remoteName": "upstream",
  "enforcePrefix": false,
  "allowedPrefixes": ["feat/", "fix/"],
  "protect": ["main", "release"],
  "confirmOnPrune": false,
  "confirmOnSync": true,
  "logLevel": "silent",
  "autoStash": false,
  "restoreStashOnFailure": true,
  "preCommitCommand": "cargo fmt --check"
}
"#;
    let config = Config::from_json(json).unwrap();

    assert_eq!(config.default_base, "develop");
    assert_eq!(config.sync_strategy, SyncStrategy::Merge);
    assert_eq!(config.remote_name, "upstream");
    assert!(!config.enforce_prefix);
    assert_eq!(config.allowed_prefixes, vec!["feat/", "fix/"]);
    assert_eq!(config.protect, vec!["main", "release"]);
    assert!(!config.confirm_on_prune);
    assert!(config.confirm_on_sync);
    assert_eq!(config.log_level, LogLevel::Silent);
    assert!(!config.auto_stash);
    assert!(config.restore_stash_on_failure);
    assert_eq!(config.pre_commit_command.as_deref(), Some("cargo fmt --check"));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = Config::from_json(r#"{"colour": "blue", "remoteName": "fork"}"#).unwrap();
    assert_eq!(config.remote_name, "fork");
    assert_eq!(config.default_base, "dev");
}

#[test]
fn test_boolean_looking_strings_are_coerced() {
    let config = Config::from_json(
        r#"{"enforcePrefix": "false", "confirmOnSync": "yes", "confirmOnPrune": 0}"#,
    )
    .unwrap();

    assert!(!config.enforce_prefix);
    assert!(config.confirm_on_sync);
    assert!(!config.confirm_on_prune);
}

#[test]
fn test_invalid_values_keep_defaults() {
    let config = Config::from_json(
        r#"{"syncStrategy": "squash", "enforcePrefix": "maybe", "defaultBase": "", "protect": 7}"#,
    )
    .unwrap();

    assert_eq!(config.sync_strategy, SyncStrategy::Rebase);
    assert!(config.enforce_prefix);
    assert_eq!(config.default_base, "dev");
    assert_eq!(config.protect, vec!["main", "dev"]);
}

#[test]
fn test_enum_values_are_case_insensitive() {
    let config = Config::from_json(r#"{"syncStrategy": "MERGE", "logLevel": "Debug"}"#).unwrap();
    assert_eq!(config.sync_strategy, SyncStrategy::Merge);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_comma_separated_prefixes() {
    let config = Config::from_json(r#"{"allowedPrefixes": "feature/, chore/ ,feature/"}"#).unwrap();
    assert_eq!(config.allowed_prefixes, vec!["feature/", "chore/"]);
}

#[test]
fn test_pre_commit_command_null_and_empty() {
    let config = Config::from_json(r#"{"preCommitCommand": null}"#).unwrap();
    assert!(config.pre_commit_command.is_none());

    let config = Config::from_json(r#"{"preCommitCommand": ""}"#).unwrap();
    assert!(config.pre_commit_command.is_none());
}

#[test]
fn test_non_object_json_is_an_error() {
    let result = Config::from_json("[1, 2, 3]");
    assert!(matches!(result, Err(GitHelperError::Config(_))));
}

#[test]
fn test_malformed_json_is_an_error() {
    let result = Config::from_json("{ not json");
    assert!(matches!(result, Err(GitHelperError::Config(_))));
}

#[test]
fn test_resolve_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::resolve(temp_dir.path().join(".githelper.json"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_resolve_malformed_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".githelper.json");
    std::fs::write(&path, "{\"defaultBase\": \"main\",").unwrap();

    let config = Config::resolve(&path);
    assert_eq!(config, Config::default());
}

#[test]
fn test_resolve_reads_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".githelper.json");
    std::fs::write(&path, r#"{"defaultBase": "main", "protect": ["main"]}"#).unwrap();

    let config = Config::resolve(&path);
    assert_eq!(config.default_base, "main");
    assert_eq!(config.protect, vec!["main"]);
}

#[test]
fn test_load_missing_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = Config::load(temp_dir.path().join("nope.json"));

    let err = result.unwrap_err();
    assert!(matches!(err, GitHelperError::Config(_)));
    assert_eq!(err.exit_code(), crate::exit_codes::CONFIG_ERROR);
}

#[test]
fn test_coerce_bool_variants() {
    assert_eq!(coerce_bool(&json!(true)), Some(true));
    assert_eq!(coerce_bool(&json!("ON")), Some(true));
    assert_eq!(coerce_bool(&json!("off")), Some(false));
    assert_eq!(coerce_bool(&json!(1)), Some(true));
    assert_eq!(coerce_bool(&json!(2)), None);
    assert_eq!(coerce_bool(&json!(null)), None);
}

#[test]
fn test_coerce_list_rejects_nested_values() {
    assert_eq!(coerce_list(&json!(["a", {"b": 1}])), None);
    assert_eq!(coerce_list(&json!([])), Some(vec![]));
}

#[test]
fn test_serializes_with_camel_case_keys() {
    let value = serde_json::to_value(Config::default()).unwrap();
    assert_eq!(value["defaultBase"], json!("dev"));
    assert_eq!(value["syncStrategy"], json!("rebase"));
    assert_eq!(value["logLevel"], json!("info"));
    assert!(value.get("preCommitCommand").is_none());
}

#[test]
fn test_serialized_config_reads_back_through_coercion() {
    let cfg = Config {
        sync_strategy: SyncStrategy::Merge,
        log_level: LogLevel::Silent,
        pre_commit_command: Some("make lint".to_string()),
        ..Config::default()
    };
    let text = serde_json::to_string(&cfg).unwrap();
    assert_eq!(Config::from_json(&text).unwrap(), cfg);
}
