use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use civersion::cli::orchestration::{self, RunArgs, DEFAULT_OUTPUT_FILE};
use civersion::config::{self, Config};
use civersion::ui;

#[derive(clap::Parser)]
#[command(
    name = "civersion",
    about = "Calculate the next semantic version, based on the branch being built and the current version",
    disable_version_flag = true
)]
struct Args {
    #[arg(
        short = 'v',
        long,
        help = "The current version, whatever it may be",
        required_unless_present = "dump_config"
    )]
    version: Option<String>,

    #[arg(
        short,
        long,
        help = "The branch being built",
        required_unless_present = "dump_config"
    )]
    branch: Option<String>,

    #[arg(short, long, help = "The version that master is currently on")]
    master: Option<String>,

    #[arg(
        short,
        long,
        alias = "forceVersion",
        help = "Use this version instead of calculating one"
    )]
    force_version: Option<String>,

    #[arg(short, long, help = "The config file to read instead of the defaults")]
    config: Option<String>,

    #[arg(
        short,
        long,
        alias = "outputFile",
        help = "Where to write the results [default: version.json]",
        conflicts_with = "dry_run"
    )]
    output_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        alias = "dryrun",
        help = "Print the next version without writing the output file"
    )]
    dry_run: bool,

    #[arg(
        short = 'z',
        long,
        alias = "dumpConfig",
        help = "Dump the default config and exit",
        conflicts_with_all = ["version", "branch", "master", "force_version", "config", "output_file", "dry_run"]
    )]
    dump_config: bool,

    #[arg(short = 'V', long, help = "Print extra logging info")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<()> {
    if args.dump_config {
        println!("{}", Config::default().to_json_pretty()?);
        return Ok(());
    }

    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    // clap guarantees both are present unless --dump-config was given
    let run_args = RunArgs {
        version: args.version.unwrap_or_default(),
        master: args.master,
        branch: args.branch.unwrap_or_default(),
        force_version: args.force_version,
        output_file: args
            .output_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        dry_run: args.dry_run,
    };

    if !run_args.dry_run {
        ui::display_status(&format!(
            "Calculating the next version for branch '{}'",
            run_args.branch
        ));
    }

    let outcome =
        orchestration::run(&run_args, &config).context("Failed to calculate the version")?;

    match &outcome.written_to {
        Some(path) => {
            ui::display_version_change(&outcome.info);
            ui::display_success(&format!("Wrote the version info to {}", path.display()));
        }
        None => {
            // stdout carries only the JSON on a dry run
            debug!("the resulting output is:");
            println!("{}", serde_json::to_string_pretty(&outcome.info)?);
        }
    }

    Ok(())
}
