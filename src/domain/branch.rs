//! Branch classification - maps a raw CI branch ref to a category and label

use std::fmt;

use regex::Regex;
use tracing::debug;

/// Label attached to every pull request build
pub const PULL_REQUEST_LABEL: &str = "pr";

/// The kind of branch being built
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BranchCategory {
    Develop,
    Master,
    Release,
    PullRequest,
    Feature,
    /// Any other branch, keyed by its trimmed name
    Other(String),
}

impl BranchCategory {
    /// Map a configuration key or trimmed branch name onto a category.
    ///
    /// `main` is treated as `master`, and both `pullrequest` and `pull-request`
    /// name the pull request category. Anything else is kept verbatim.
    pub fn from_key(key: &str) -> Self {
        match key {
            "develop" => BranchCategory::Develop,
            "master" | "main" => BranchCategory::Master,
            "release" => BranchCategory::Release,
            "pullrequest" | "pull-request" => BranchCategory::PullRequest,
            "feature" => BranchCategory::Feature,
            other => BranchCategory::Other(other.to_string()),
        }
    }

    /// The configuration key for this category
    pub fn key(&self) -> &str {
        match self {
            BranchCategory::Develop => "develop",
            BranchCategory::Master => "master",
            BranchCategory::Release => "release",
            BranchCategory::PullRequest => "pullrequest",
            BranchCategory::Feature => "feature",
            BranchCategory::Other(name) => name,
        }
    }
}

impl fmt::Display for BranchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Result of classifying a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub category: BranchCategory,
    /// Pre-release label taken from the branch name, if any
    pub label: Option<String>,
}

impl BranchContext {
    /// Classify a raw branch name such as `refs/heads/feature/login`.
    ///
    /// Prefixes are stripped in a fixed order (`/`, `refs/`, `heads/`), each at
    /// most once. The `feature/`, `release/` and `pull/` patterns are then tried
    /// in that order against the trimmed name, a later match replacing an
    /// earlier one.
    pub fn classify(raw: &str) -> Self {
        let trimmed = trim_ref(raw);
        debug!(branch = raw, trimmed, "trimmed git branch");

        let mut category = BranchCategory::from_key(trimmed);
        let mut label = None;

        if let Some(rest) = capture_rest("feature/", trimmed) {
            category = BranchCategory::Feature;
            label = non_empty(rest);
        }
        if let Some(rest) = capture_rest("release/", trimmed) {
            category = BranchCategory::Release;
            label = non_empty(rest);
        }
        if capture_rest("pull/", trimmed).is_some() {
            category = BranchCategory::PullRequest;
            label = Some(PULL_REQUEST_LABEL.to_string());
        }

        debug!(%category, label = ?label, "classified branch");
        BranchContext { category, label }
    }
}

/// Drop a leading `/`, then `refs/`, then `heads/`.
fn trim_ref(raw: &str) -> &str {
    let branch = raw.strip_prefix('/').unwrap_or(raw);
    let branch = branch.strip_prefix("refs/").unwrap_or(branch);
    branch.strip_prefix("heads/").unwrap_or(branch)
}

/// Find `prefix` anywhere in `branch` and return whatever follows it.
fn capture_rest(prefix: &str, branch: &str) -> Option<String> {
    let re = Regex::new(&format!("{}(.*)", regex::escape(prefix))).ok()?;
    re.captures(branch)
        .and_then(|captures| captures.get(1))
        .map(|rest| rest.as_str().to_string())
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
