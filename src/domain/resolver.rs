//! Next-version resolution for a classified branch

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::branch::BranchCategory;
use crate::domain::prerelease;
use crate::domain::rules::RuleSet;
use crate::domain::version::{cmp_precedence, increment, parse_version, IncrementLevel};
use crate::error::Result;

/// Compute the version that follows `previous` for a build of `category`.
///
/// Both `previous` and `master` are validated first; either failing to parse
/// is an `InvalidVersion` error. After that:
///
/// 1. A non-empty `force` is returned verbatim.
/// 2. The rule for `category` is looked up (patch when there is none). A fixed
///    label on the rule replaces `label`.
/// 3. When `master` is strictly ahead of `previous` it becomes the base.
/// 4. When the base is already on the `label` pre-release train, the level is
///    switched to `prerelease` so the train continues.
/// 5. The base is incremented by the level.
///
/// # Example
/// ```ignore
/// let rules = RuleSet::builtin();
/// let next = resolve("1.0.0", Some("1.1.0"), &BranchCategory::Develop, None, None, &rules)?;
/// assert_eq!(next, "1.1.1");
/// ```
pub fn resolve(
    previous: &str,
    master: Option<&str>,
    category: &BranchCategory,
    label: Option<&str>,
    force: Option<&str>,
    rules: &RuleSet,
) -> Result<String> {
    let previous = parse_version(previous)?;
    let master = master
        .filter(|m| !m.trim().is_empty())
        .map(parse_version)
        .transpose()?;

    if let Some(force) = force.filter(|f| !f.is_empty()) {
        debug!(force, "version is being forcibly set");
        return Ok(force.to_string());
    }

    let rule = rules.rule_for(category);
    let label = rule
        .label
        .as_deref()
        .or(label)
        .and_then(prerelease::normalize_label);
    debug!(%category, level = %rule.level, label = ?label, "branch rule");

    let base = match master {
        Some(master) if cmp_precedence(&master, &previous) == Ordering::Greater => {
            debug!(%master, %previous, "master version is ahead");
            master
        }
        _ => previous,
    };

    let level = if prerelease::continues_train(&base.pre, label.as_deref()) {
        debug!(pre = base.pre.as_str(), "continuing pre-release train");
        IncrementLevel::Prerelease
    } else {
        rule.level
    };

    let next = increment(&base, level, label.as_deref())?;
    debug!(%base, %level, %next, "calculated next version");
    Ok(next.to_string())
}
