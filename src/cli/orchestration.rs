//! Main workflow orchestration logic
//!
//! Keeps the run itself (config, resolution, version file) apart from clap
//! so it can be driven programmatically.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::domain::VersionInfo;
use crate::error::Result;

/// Default file the version info is written to
pub const DEFAULT_OUTPUT_FILE: &str = "version.json";

/// Arguments for a single version calculation
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// The current version
    pub version: String,

    /// The version master is currently on
    pub master: Option<String>,

    /// The branch being built
    pub branch: String,

    /// Forced result; takes precedence over `forceVersion` in the config
    pub force_version: Option<String>,

    /// Where to write the version info
    pub output_file: PathBuf,

    /// Print instead of writing the output file
    pub dry_run: bool,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub info: VersionInfo,

    /// The file the info was written to, `None` on a dry run
    pub written_to: Option<PathBuf>,
}

/// Calculate the version info for `args` under `config`.
pub fn calculate(args: &RunArgs, config: &Config) -> Result<VersionInfo> {
    debug!(branch = %args.branch, version = %args.version, "updating version");

    let force = args
        .force_version
        .as_deref()
        .or(config.force_version.as_deref());
    let rules = config.rule_set();

    VersionInfo::compute(
        &args.version,
        args.master.as_deref(),
        &args.branch,
        force,
        &rules,
    )
}

/// Write `info` as JSON to `path`.
pub fn save_version_file(path: &Path, info: &VersionInfo) -> Result<()> {
    let json = serde_json::to_string(info)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "wrote the version info");
    Ok(())
}

/// Run the whole workflow:
/// 1. Resolve the next version
/// 2. Write the version file, unless this is a dry run
pub fn run(args: &RunArgs, config: &Config) -> Result<RunOutcome> {
    let info = calculate(args, config)?;

    let written_to = if args.dry_run {
        None
    } else {
        save_version_file(&args.output_file, &info)?;
        Some(args.output_file.clone())
    };

    Ok(RunOutcome { info, written_to })
}
