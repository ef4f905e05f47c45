use async_trait::async_trait;
use clap::{Args, Subcommand};
use regex::Regex;
use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;
use whittle_oracle::{CommandTransform, ExternalCheck, Oracle};

pub mod check;
pub mod reduce;
pub mod spans;

/// Errors that can occur while wiring a reduction run.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// An oracle pattern failed to compile.
    #[error("invalid pattern for {flag}: {source}")]
    BadPattern {
        /// The CLI flag the pattern came from.
        flag: &'static str,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
    /// File read/write error.
    #[error("file error: {0}")]
    File(#[from] std::io::Error),
    /// No input file survived the skip list.
    #[error("no input files to reduce")]
    NoInputs,
    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// CLI subcommands for Whittle.
#[derive(Subcommand)]
pub enum Cmd {
    /// Reduce artifacts to locally minimal reproducers.
    Reduce(reduce::ReduceArgs),
    /// Evaluate the oracle once on an artifact and print the verdict.
    Check(check::CheckArgs),
    /// Print the token-edit spans the proposer battery would suggest.
    Spans(spans::SpansArgs),
}

/// Trait for executing CLI subcommands.
#[async_trait]
pub trait Command {
    /// Executes the subcommand.
    ///
    /// # Returns
    /// A `Result` indicating success or an error if execution fails.
    async fn execute(self) -> Result<(), Box<dyn Error>>;
}

#[async_trait]
impl Command for Cmd {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        match self {
            Cmd::Reduce(args) => args.execute().await,
            Cmd::Check(args) => args.execute().await,
            Cmd::Spans(args) => args.execute().await,
        }
    }
}

/// Oracle configuration shared by `reduce` and `check`.
#[derive(Args)]
pub struct OracleArgs {
    /// Transform program; invoked as `<program> <candidate-file>
    /// [rule...]` and expected to rewrite the file in place.
    #[arg(long, value_name = "PROGRAM")]
    pub transform: PathBuf,

    /// Comma-separated opaque rule identifiers passed to the transform.
    #[arg(long, default_value = "")]
    pub rules: String,

    /// The condition is a transform crash whose rendered error matches
    /// this pattern.
    #[arg(long, value_name = "REGEX")]
    pub expect_error: Option<String>,

    /// Candidate text must match this pattern before the transform runs.
    #[arg(long, value_name = "REGEX")]
    pub pre_pattern: Option<String>,

    /// Precheck program run on the materialized candidate; nonzero exit
    /// rejects it.
    #[arg(long, value_name = "PROGRAM")]
    pub pre_check: Option<PathBuf>,

    /// Transformed text must match this pattern to count as reproduced.
    #[arg(long, value_name = "REGEX")]
    pub post_pattern: Option<String>,

    /// Verifier program run on the materialized transformed text; exit 0
    /// = reproduced.
    #[arg(long, value_name = "PROGRAM")]
    pub post_check: Option<PathBuf>,
}

impl OracleArgs {
    /// Builds the oracle from the parsed flags.
    pub fn build(&self) -> Result<Oracle, ReduceError> {
        let mut oracle = Oracle::new(Box::new(CommandTransform::new(&self.transform)));
        oracle.precondition = compile(&self.pre_pattern, "--pre-pattern")?;
        oracle.expected_error = compile(&self.expect_error, "--expect-error")?;
        oracle.postcondition = compile(&self.post_pattern, "--post-pattern")?;
        oracle.precheck = self.pre_check.as_ref().map(ExternalCheck::new);
        oracle.verifier = self.post_check.as_ref().map(ExternalCheck::new);
        Ok(oracle)
    }

    /// The rule catalog from the comma-separated flag, empty entries
    /// dropped.
    pub fn rule_catalog(&self) -> Vec<String> {
        self.rules
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

fn compile(pattern: &Option<String>, flag: &'static str) -> Result<Option<Regex>, ReduceError> {
    pattern
        .as_deref()
        .map(Regex::new)
        .transpose()
        .map_err(|source| ReduceError::BadPattern { flag, source })
}
