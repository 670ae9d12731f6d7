// tests/config_test.rs
use civersion::config::{load_config, Config, CONFIG_FILE_NAME};
use civersion::domain::{BranchCategory, CategoryRule, IncrementLevel, RuleSet};
use serial_test::serial;
use std::io::Write;
use tempfile::{Builder, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(
        config.branches.get("develop").and_then(|r| r.level.as_deref()),
        Some("patch")
    );
    assert_eq!(
        config.branches.get("release").and_then(|r| r.level.as_deref()),
        Some("preminor")
    );
    assert_eq!(config.rule_set(), RuleSet::builtin());
}

#[test]
fn test_load_toml_from_file() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    let toml_content = r#"
[develop]
level = "minor"

[feature]
level = "prerelease"
label = "next"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    let rules = config.rule_set();
    assert_eq!(
        rules.rule_for(&BranchCategory::Develop),
        CategoryRule::new(IncrementLevel::Minor)
    );
    assert_eq!(
        rules.rule_for(&BranchCategory::Feature),
        CategoryRule::with_label(IncrementLevel::Prerelease, "next")
    );
}

#[test]
fn test_load_json_from_file() {
    let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
    let json_content = r#"{
  "forceVersion": "7.0.0",
  "master": { "level": "major" }
}"#;
    temp_file.write_all(json_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.force_version.as_deref(), Some("7.0.0"));
    assert_eq!(
        config.rule_set().rule_for(&BranchCategory::Master).level,
        IncrementLevel::Major
    );
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nonexistent.json");

    let err = load_config(Some(missing.to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("nonexistent.json"));
}

#[test]
#[serial]
fn test_config_discovered_in_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[develop]\nlevel = \"prepatch\"\nlabel = \"dev\"\n",
    )
    .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let loaded = load_config(None);
    std::env::set_current_dir(original).unwrap();

    let rules = loaded.unwrap().rule_set();
    assert_eq!(
        rules.rule_for(&BranchCategory::Develop),
        CategoryRule::with_label(IncrementLevel::Prepatch, "dev")
    );
}

#[test]
fn test_invalid_entry_falls_back_instead_of_failing() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    temp_file
        .write_all(b"[pullrequest]\nlabel = \"review\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(
        config.rule_set().rule_for(&BranchCategory::PullRequest),
        CategoryRule::new(IncrementLevel::Prepatch)
    );
}
