//! Command-line entry point: resolve ownership for a batch of tests, or
//! verify that a regenerated mapping lost no ownership.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use testmap::types::UNKNOWN_COMPONENT;
use testmap::{components, resolver, snapshot, verify};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ci-test-mapping",
    version,
    about = "Assign CI tests to owning components and verify mappings"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve ownership for a batch of tests and write a snapshot.
    Resolve {
        /// JSON array of test records (name, suite, variants).
        #[arg(long)]
        tests: PathBuf,

        /// Where to write the ownership snapshot; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Verify no test lost its owner between two snapshots.
    Verify {
        /// Previously published snapshot.
        #[arg(long)]
        old: PathBuf,

        /// Freshly generated snapshot.
        #[arg(long)]
        new: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Command::Resolve { tests, output } => {
            let registry = components::builtin_registry()
                .context("invalid built-in component configuration")?;
            let tests = snapshot::load_tests(&tests).context("loading test list")?;

            let started = Instant::now();
            let records = resolver::resolve_all(&tests, &registry);
            info!(
                tests = records.len(),
                elapsed = ?started.elapsed(),
                "resolved ownership"
            );

            match output {
                Some(path) => snapshot::save(&path, &records).context("writing snapshot")?,
                None => println!("{}", serde_json::to_string_pretty(&records)?),
            }
            Ok(true)
        }
        Command::Verify { old, new } => {
            let old_records = snapshot::load(&old).context("loading previous snapshot")?;
            let new_records = snapshot::load(&new).context("loading new snapshot")?;

            let started = Instant::now();
            let regressions = verify::verify(&old_records, &new_records);
            info!(elapsed = ?started.elapsed(), "verification complete");

            let ok = verify::report(&regressions);
            if !ok {
                error!(
                    count = regressions.len(),
                    "tests are not allowed to move to {UNKNOWN_COMPONENT:?}; assign correct ownership"
                );
            }
            Ok(ok)
        }
    }
}
