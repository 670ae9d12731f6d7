use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};

use crate::domain::prerelease;
use crate::error::{CiVersionError, Result};

/// Parse a semantic version, tolerating surrounding whitespace and a single
/// leading `=` or `v` (e.g. "v1.2.3").
pub fn parse_version(input: &str) -> Result<Version> {
    let trimmed = input.trim();
    let clean = trimmed.strip_prefix('=').unwrap_or(trimmed).trim_start();
    let clean = clean.strip_prefix('v').unwrap_or(clean);

    Version::parse(clean).map_err(|e| CiVersionError::invalid_version(input, e))
}

/// Compare two versions by semver precedence, ignoring build metadata
pub fn cmp_precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

/// Which part of a version a build increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncrementLevel {
    Major,
    Minor,
    Patch,
    Premajor,
    Preminor,
    Prepatch,
    Prerelease,
}

impl IncrementLevel {
    /// Whether this level produces a pre-release version
    pub fn is_prerelease(&self) -> bool {
        matches!(
            self,
            IncrementLevel::Premajor
                | IncrementLevel::Preminor
                | IncrementLevel::Prepatch
                | IncrementLevel::Prerelease
        )
    }
}

impl FromStr for IncrementLevel {
    type Err = CiVersionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(IncrementLevel::Major),
            "minor" => Ok(IncrementLevel::Minor),
            "patch" => Ok(IncrementLevel::Patch),
            "premajor" => Ok(IncrementLevel::Premajor),
            "preminor" => Ok(IncrementLevel::Preminor),
            "prepatch" => Ok(IncrementLevel::Prepatch),
            "prerelease" => Ok(IncrementLevel::Prerelease),
            other => Err(CiVersionError::invalid_configuration(format!(
                "unknown increment level '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for IncrementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IncrementLevel::Major => "major",
            IncrementLevel::Minor => "minor",
            IncrementLevel::Patch => "patch",
            IncrementLevel::Premajor => "premajor",
            IncrementLevel::Preminor => "preminor",
            IncrementLevel::Prepatch => "prepatch",
            IncrementLevel::Prerelease => "prerelease",
        };
        write!(f, "{}", name)
    }
}

/// Increment `version` by `level`.
///
/// - **Major/Minor/Patch**: bump the component and zero the lower ones. A
///   pre-release that already sits on the target release is simply released
///   (`1.3.0-beta.2` bumped by minor is `1.3.0`).
/// - **Premajor/Preminor/Prepatch**: bump the component, then open a new
///   pre-release train at `label.0` (or `0` without a label).
/// - **Prerelease**: advance the existing train, or bump patch and open one.
///
/// `label` is only used by the pre-release levels. Build metadata is dropped.
pub fn increment(version: &Version, level: IncrementLevel, label: Option<&str>) -> Result<Version> {
    let mut next = Version {
        major: version.major,
        minor: version.minor,
        patch: version.patch,
        pre: version.pre.clone(),
        build: BuildMetadata::EMPTY,
    };

    match level {
        IncrementLevel::Major => {
            if next.minor != 0 || next.patch != 0 || next.pre.is_empty() {
                next.major = bump_component(next.major, version)?;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        IncrementLevel::Minor => {
            if next.patch != 0 || next.pre.is_empty() {
                next.minor = bump_component(next.minor, version)?;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        IncrementLevel::Patch => {
            if next.pre.is_empty() {
                next.patch = bump_component(next.patch, version)?;
            }
            next.pre = Prerelease::EMPTY;
        }
        IncrementLevel::Premajor => {
            next.major = bump_component(next.major, version)?;
            next.minor = 0;
            next.patch = 0;
            next.pre = prerelease::advance(&Prerelease::EMPTY, label)?;
        }
        IncrementLevel::Preminor => {
            next.minor = bump_component(next.minor, version)?;
            next.patch = 0;
            next.pre = prerelease::advance(&Prerelease::EMPTY, label)?;
        }
        IncrementLevel::Prepatch => {
            next.patch = bump_component(next.patch, version)?;
            next.pre = prerelease::advance(&Prerelease::EMPTY, label)?;
        }
        IncrementLevel::Prerelease => {
            if next.pre.is_empty() {
                next.patch = bump_component(next.patch, version)?;
            }
            next.pre = prerelease::advance(&next.pre, label)?;
        }
    }

    Ok(next)
}

/// Add one to a version component, refusing to wrap past `u64::MAX`
fn bump_component(value: u64, version: &Version) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| CiVersionError::version_overflow(version.to_string()))
}
