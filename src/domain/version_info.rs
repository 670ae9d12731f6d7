use serde::{Deserialize, Serialize};

use crate::domain::branch::BranchContext;
use crate::domain::resolver::resolve;
use crate::domain::rules::RuleSet;
use crate::error::Result;

/// Outcome of a single run, written to the version file.
///
/// `previous_version` is always the version that was passed in, even when the
/// master version was used as the base for the increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub previous_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_version: Option<String>,
    pub current_version: String,
}

impl VersionInfo {
    /// Classify `branch` and resolve the next version against `rules`
    pub fn compute(
        previous: &str,
        master: Option<&str>,
        branch: &str,
        force: Option<&str>,
        rules: &RuleSet,
    ) -> Result<Self> {
        let context = BranchContext::classify(branch);
        let current = resolve(
            previous,
            master,
            &context.category,
            context.label.as_deref(),
            force,
            rules,
        )?;

        Ok(VersionInfo {
            previous_version: previous.to_string(),
            master_version: master.filter(|m| !m.trim().is_empty()).map(str::to_string),
            force_version: force.filter(|f| !f.is_empty()).map(str::to_string),
            current_version: current,
        })
    }
}
