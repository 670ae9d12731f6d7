use std::collections::HashMap;

use crate::domain::branch::BranchCategory;
use crate::domain::version::IncrementLevel;

/// How builds of one branch category are incremented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub level: IncrementLevel,
    /// Fixed pre-release label, used instead of the one from the branch name
    pub label: Option<String>,
}

impl CategoryRule {
    pub fn new(level: IncrementLevel) -> Self {
        CategoryRule { level, label: None }
    }

    pub fn with_label(level: IncrementLevel, label: impl Into<String>) -> Self {
        CategoryRule {
            level,
            label: Some(label.into()),
        }
    }
}

impl Default for CategoryRule {
    /// Branches without a rule get a plain patch bump
    fn default() -> Self {
        CategoryRule::new(IncrementLevel::Patch)
    }
}

/// Immutable branch category to rule table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    rules: HashMap<BranchCategory, CategoryRule>,
}

impl RuleSet {
    pub fn new(rules: HashMap<BranchCategory, CategoryRule>) -> Self {
        RuleSet { rules }
    }

    /// The rules used when no configuration overrides them
    pub fn builtin() -> Self {
        let mut rules = HashMap::new();
        rules.insert(
            BranchCategory::Develop,
            CategoryRule::new(IncrementLevel::Patch),
        );
        rules.insert(
            BranchCategory::Master,
            CategoryRule::new(IncrementLevel::Minor),
        );
        rules.insert(
            BranchCategory::Release,
            CategoryRule::new(IncrementLevel::Preminor),
        );
        rules.insert(
            BranchCategory::PullRequest,
            CategoryRule::new(IncrementLevel::Prepatch),
        );
        rules.insert(
            BranchCategory::Feature,
            CategoryRule::new(IncrementLevel::Prepatch),
        );
        RuleSet { rules }
    }

    /// The configured rule for `category`, if there is one
    pub fn get(&self, category: &BranchCategory) -> Option<&CategoryRule> {
        self.rules.get(category)
    }

    /// The rule for `category`, falling back to a patch bump
    pub fn rule_for(&self, category: &BranchCategory) -> CategoryRule {
        self.get(category).cloned().unwrap_or_default()
    }

    /// Iterate over the configured rules
    pub fn iter(&self) -> impl Iterator<Item = (&BranchCategory, &CategoryRule)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels() {
        let rules = RuleSet::builtin();
        let expected = [
            (BranchCategory::Develop, IncrementLevel::Patch),
            (BranchCategory::Master, IncrementLevel::Minor),
            (BranchCategory::Release, IncrementLevel::Preminor),
            (BranchCategory::PullRequest, IncrementLevel::Prepatch),
            (BranchCategory::Feature, IncrementLevel::Prepatch),
        ];

        assert_eq!(rules.len(), expected.len());
        for (category, level) in expected {
            assert_eq!(rules.rule_for(&category), CategoryRule::new(level));
        }
    }

    #[test]
    fn test_unknown_category_defaults_to_patch() {
        let rules = RuleSet::builtin();
        let category = BranchCategory::Other("chore/cleanup".to_string());
        assert!(rules.get(&category).is_none());
        assert_eq!(rules.rule_for(&category).level, IncrementLevel::Patch);
        assert_eq!(rules.rule_for(&category).label, None);
    }

    #[test]
    fn test_empty_rule_set() {
        let rules = RuleSet::default();
        assert!(rules.is_empty());
        assert_eq!(rules.rule_for(&BranchCategory::Master), CategoryRule::default());
    }

    #[test]
    fn test_custom_rules() {
        let mut map = HashMap::new();
        map.insert(
            BranchCategory::Other("hotfix".to_string()),
            CategoryRule::with_label(IncrementLevel::Prepatch, "hotfix"),
        );
        let rules = RuleSet::new(map);

        let rule = rules.rule_for(&BranchCategory::Other("hotfix".to_string()));
        assert_eq!(rule.level, IncrementLevel::Prepatch);
        assert_eq!(rule.label.as_deref(), Some("hotfix"));
        assert_eq!(rules.iter().count(), 1);
    }
}
