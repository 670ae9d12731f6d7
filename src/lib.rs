pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ui;

pub use domain::{BranchCategory, BranchContext, RuleSet, VersionInfo};
pub use error::{CiVersionError, Result};
