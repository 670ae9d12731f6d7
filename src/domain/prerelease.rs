//! Pre-release train handling
//!
//! A train is a run of pre-release versions sharing a label, e.g.
//! `1.2.0-beta.0`, `1.2.0-beta.1`, ... See https://semver.org/#spec-item-9

use semver::Prerelease;

use crate::error::{CiVersionError, Result};

/// Turn a label taken from a branch name into valid pre-release identifiers.
///
/// Characters outside `[0-9A-Za-z-.]` become `-`, empty segments are dropped
/// and numeric segments lose their leading zeros. Returns `None` when nothing
/// usable is left.
///
/// # Examples
/// ```ignore
/// assert_eq!(normalize_label("JIRA_12").as_deref(), Some("JIRA-12"));
/// assert_eq!(normalize_label("2.01").as_deref(), Some("2.1"));
/// ```
pub fn normalize_label(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let segments: Vec<&str> = cleaned
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if is_numeric(segment) {
                let stripped = segment.trim_start_matches('0');
                if stripped.is_empty() {
                    "0"
                } else {
                    stripped
                }
            } else {
                segment
            }
        })
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("."))
    }
}

/// Whether `pre` belongs to the train named `label`.
///
/// Only the first identifier is compared: a `beta.3` pre-release continues the
/// `beta` train, but a dotted label such as `2.0` never matches.
pub fn continues_train(pre: &Prerelease, label: Option<&str>) -> bool {
    match label {
        Some(label) if !pre.is_empty() => pre.as_str().split('.').next() == Some(label),
        _ => false,
    }
}

/// Advance a pre-release by one step.
///
/// The last numeric identifier is incremented (a `0` is appended when there is
/// none, and an empty pre-release becomes `0`). With a label, anything that is
/// not already `label.<number>...` restarts as `label.0`.
pub fn advance(pre: &Prerelease, label: Option<&str>) -> Result<Prerelease> {
    let mut ids: Vec<String> = if pre.is_empty() {
        vec!["0".to_string()]
    } else {
        let mut ids: Vec<String> = pre.as_str().split('.').map(str::to_string).collect();
        match ids.iter().rposition(|id| is_numeric(id)) {
            Some(i) => {
                let n: u64 = ids[i]
                    .parse()
                    .map_err(|_| CiVersionError::invalid_label(pre.as_str()))?;
                let n = n
                    .checked_add(1)
                    .ok_or_else(|| CiVersionError::invalid_label(pre.as_str()))?;
                ids[i] = n.to_string();
            }
            None => ids.push("0".to_string()),
        }
        ids
    };

    if let Some(label) = label {
        let same_train =
            ids[0] == label && ids.get(1).map(|id| is_numeric(id)).unwrap_or(false);
        if !same_train {
            ids = vec![label.to_string(), "0".to_string()];
        }
    }

    let joined = ids.join(".");
    Prerelease::new(&joined).map_err(|_| CiVersionError::invalid_label(joined))
}

fn is_numeric(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}
