//! Domain logic - pure version rules independent of files and the command line

pub mod branch;
pub mod prerelease;
pub mod resolver;
pub mod rules;
pub mod version;
pub mod version_info;

pub use branch::{BranchCategory, BranchContext};
pub use resolver::resolve;
pub use rules::{CategoryRule, RuleSet};
pub use version::{increment, parse_version, IncrementLevel};
pub use version_info::VersionInfo;
