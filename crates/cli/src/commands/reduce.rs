//! Module for the `reduce` subcommand, which delta-debugs artifacts down
//! to locally minimal reproducers.
//!
//! Each input gets its own session. The minimized artifact lands next to
//! the input with a `-ddmin` suffix, the running best with
//! `-ddmin-latest`; the input itself is never rewritten.

use crate::commands::{Command, OracleArgs, ReduceError};
use async_trait::async_trait;
use clap::Args;
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use whittle_reduce::{reduce_artifact, ReductionResult, Session};

/// Arguments for the `reduce` subcommand.
#[derive(Args)]
pub struct ReduceArgs {
    /// Input artifact files known to reproduce the condition.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub oracle: OracleArgs,

    /// File names to skip (e.g. inputs known to hang the transform).
    #[arg(long, value_name = "FILE_NAME")]
    pub skip: Vec<String>,

    /// Path to emit the reduction reports as JSON.
    #[arg(long, value_name = "PATH")]
    pub emit: Option<PathBuf>,
}

/// Per-file entry of the `--emit` report.
#[derive(Serialize)]
struct FileReport {
    file: String,
    result: ReductionResult,
}

#[async_trait]
impl Command for ReduceArgs {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        let oracle_args = &self.oracle;
        let catalog = oracle_args.rule_catalog();

        let mut reports = Vec::new();
        let mut first_failure: Option<Box<dyn Error>> = None;
        let mut reduced_any = false;

        for input in &self.inputs {
            if is_skipped(input, &self.skip) {
                info!(file = %input.display(), "skipping (on the skip list)");
                continue;
            }
            reduced_any = true;
            info!(file = %input.display(), "reducing");

            match reduce_one(input, oracle_args, &catalog) {
                Ok(result) => {
                    println!(
                        "{}: {} -> {} bytes in {} cycles ({} probes)",
                        input.display(),
                        result.original_len,
                        result.reduced_len,
                        result.cycles,
                        result.stats.probes
                    );
                    reports.push(FileReport {
                        file: input.display().to_string(),
                        result,
                    });
                }
                Err(e) => {
                    warn!(file = %input.display(), error = %e, "reduction failed");
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        if !reduced_any {
            return Err(ReduceError::NoInputs.into());
        }

        if let Some(path) = self.emit.as_ref() {
            fs::write(path, serde_json::to_string_pretty(&reports).map_err(ReduceError::from)?)
                .map_err(ReduceError::from)?;
            println!("Wrote reduction report to {}", path.display());
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn is_skipped(input: &Path, skip: &[String]) -> bool {
    input
        .file_name()
        .map(|name| skip.iter().any(|s| name == s.as_str()))
        .unwrap_or(false)
}

fn reduce_one(
    input: &Path,
    oracle_args: &OracleArgs,
    catalog: &[String],
) -> Result<ReductionResult, Box<dyn Error>> {
    let text = fs::read_to_string(input).map_err(ReduceError::from)?;

    let oracle = oracle_args.build()?;
    let mut session = Session::new(oracle, catalog.to_vec())
        .with_checkpoint(suffixed(input, "-ddmin-latest"));

    let result = reduce_artifact(&text, &mut session)?;

    fs::write(suffixed(input, "-ddmin"), &result.reduced).map_err(ReduceError::from)?;
    Ok(result)
}

/// `foo.java` -> `foo.java-ddmin` style sibling path.
fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
