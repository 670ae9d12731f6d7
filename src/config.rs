use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::{BranchCategory, CategoryRule, IncrementLevel, RuleSet};
use crate::error::{CiVersionError, Result};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "civersion.toml";

/// Represents the complete configuration for civersion.
///
/// Holds an optional forced version and one rule per branch category, keyed
/// by category name (`develop`, `master`, `release`, `pullrequest`, `feature`)
/// or by a literal branch name.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(rename = "forceVersion", alias = "force_version", default)]
    pub force_version: Option<String>,

    #[serde(flatten)]
    pub branches: BTreeMap<String, BranchRuleConfig>,
}

/// A single branch entry as written in the configuration file.
///
/// Both fields are optional on disk so that one broken entry does not reject
/// the whole file; see [`BranchRuleConfig::to_rule`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BranchRuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BranchRuleConfig {
    /// Validate this entry into a rule for the branch `key`.
    ///
    /// # Returns
    /// * `Ok(CategoryRule)` - The entry names a known increment level
    /// * `Err(InvalidConfiguration)` - `level` is missing or unknown
    pub fn to_rule(&self, key: &str) -> Result<CategoryRule> {
        let level = self.level.as_deref().ok_or_else(|| {
            CiVersionError::invalid_configuration(format!("branch '{}' has no level", key))
        })?;
        let level: IncrementLevel = level.parse().map_err(|e| {
            CiVersionError::invalid_configuration(format!("branch '{}': {}", key, e))
        })?;

        Ok(CategoryRule {
            level,
            label: self.label.clone().filter(|l| !l.is_empty()),
        })
    }
}

impl Config {
    /// Build the rule set described by this configuration.
    ///
    /// Entries that fail [`BranchRuleConfig::to_rule`] fall back to the built-in
    /// rule for their category, or to a patch bump if there is none.
    pub fn rule_set(&self) -> RuleSet {
        let builtin = RuleSet::builtin();
        let rules: HashMap<BranchCategory, CategoryRule> = self
            .branches
            .iter()
            .map(|(key, entry)| {
                let category = BranchCategory::from_key(key);
                let rule = entry.to_rule(key).unwrap_or_else(|e| {
                    let fallback = builtin.rule_for(&category);
                    warn!(
                        "{}; using the default level '{}' for branch '{}'",
                        e, fallback.level, key
                    );
                    fallback
                });
                (category, rule)
            })
            .collect();

        RuleSet::new(rules)
    }

    /// Render the configuration as pretty JSON, as used by `--dump-config`
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        let branches = RuleSet::builtin()
            .iter()
            .map(|(category, rule)| {
                (
                    category.key().to_string(),
                    BranchRuleConfig {
                        level: Some(rule.level.to_string()),
                        label: rule.label.clone(),
                    },
                )
            })
            .collect();

        Config {
            force_version: None,
            branches,
        }
    }
}

/// Parses configuration text, choosing JSON or TOML from the file extension.
///
/// # Arguments
/// * `path` - Where the text came from (only its extension is used)
/// * `text` - The file contents
pub fn parse_config(path: &Path, text: &str) -> Result<Config> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_str(text).map_err(|e| {
            CiVersionError::config(format!("cannot parse {}: {}", path.display(), e))
        })
    } else {
        toml::from_str(text).map_err(|e| {
            CiVersionError::config(format!("cannot parse {}: {}", path.display(), e))
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `civersion.toml` in current directory
/// 3. `~/.config/.civersion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return read_config_file(Path::new(path));
    }

    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return read_config_file(&local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_config.exists() {
            return read_config_file(&user_config);
        }
    }

    debug!("no configuration file found, using defaults");
    Ok(Config::default())
}

fn read_config_file(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "reading configuration");
    let text = fs::read_to_string(path).map_err(|e| {
        CiVersionError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(path, &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_builtin_rules() {
        let config = Config::default();
        assert_eq!(config.force_version, None);
        assert_eq!(config.branches.len(), 5);
        assert_eq!(
            config.branches["master"].level.as_deref(),
            Some("minor")
        );
        assert_eq!(config.rule_set(), RuleSet::builtin());
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
forceVersion = "2.0.0"

[develop]
level = "prepatch"
label = "dev"

[hotfix]
level = "patch"
"#;
        let config = parse_config(Path::new("civersion.toml"), text).unwrap();
        assert_eq!(config.force_version.as_deref(), Some("2.0.0"));

        let rules = config.rule_set();
        assert_eq!(
            rules.rule_for(&BranchCategory::Develop),
            CategoryRule::with_label(IncrementLevel::Prepatch, "dev")
        );
        assert_eq!(
            rules
                .get(&BranchCategory::Other("hotfix".to_string()))
                .map(|r| r.level),
            Some(IncrementLevel::Patch)
        );
    }

    #[test]
    fn test_parse_toml_snake_case_force_version() {
        let text = "force_version = \"2.0.0\"\n\n[develop]\nlevel = \"minor\"\n";
        let config = parse_config(Path::new("c.toml"), text).unwrap();
        assert_eq!(config.force_version.as_deref(), Some("2.0.0"));
        assert!(!config.branches.contains_key("force_version"));
        assert_eq!(config.branches.len(), 1);
    }

    #[test]
    fn test_parse_json_with_null_force_version() {
        let text = r#"{
  "forceVersion": null,
  "develop": { "level": "patch" },
  "pullrequest": { "level": "prepatch" }
}"#;
        let config = parse_config(Path::new("config.json"), text).unwrap();
        assert_eq!(config.force_version, None);
        assert_eq!(config.branches.len(), 2);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_config(Path::new("broken.toml"), "[develop\nlevel=").unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_missing_level_is_invalid_configuration() {
        let entry = BranchRuleConfig {
            level: None,
            label: Some("x".to_string()),
        };
        let err = entry.to_rule("release").unwrap_err();
        assert!(matches!(err, CiVersionError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("release"));
    }

    #[test]
    fn test_unknown_level_is_invalid_configuration() {
        let entry = BranchRuleConfig {
            level: Some("giant".to_string()),
            label: None,
        };
        assert!(matches!(
            entry.to_rule("develop"),
            Err(CiVersionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_broken_entry_falls_back_to_builtin_rule() {
        let text = r#"
[release]
label = "rc"

[chore]
level = "enormous"

[master]
level = "major"
"#;
        let rules = parse_config(Path::new("c.toml"), text).unwrap().rule_set();

        assert_eq!(
            rules.rule_for(&BranchCategory::Release),
            CategoryRule::new(IncrementLevel::Preminor)
        );
        assert_eq!(
            rules.rule_for(&BranchCategory::Other("chore".to_string())),
            CategoryRule::new(IncrementLevel::Patch)
        );
        assert_eq!(
            rules.rule_for(&BranchCategory::Master).level,
            IncrementLevel::Major
        );
        // omitted categories are not inherited from the built-in set
        assert_eq!(
            rules.rule_for(&BranchCategory::Feature),
            CategoryRule::default()
        );
    }

    #[test]
    fn test_main_key_addresses_master() {
        let text = "[main]\nlevel = \"major\"\n";
        let rules = parse_config(Path::new("c.toml"), text).unwrap().rule_set();
        assert_eq!(
            rules.rule_for(&BranchCategory::Master).level,
            IncrementLevel::Major
        );
    }

    #[test]
    fn test_dump_round_trips_through_json() {
        let json = Config::default().to_json_pretty().unwrap();
        assert!(json.contains("\"develop\""));
        assert!(json.contains("\"forceVersion\": null"));

        let parsed = parse_config(Path::new("dump.json"), &json).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
