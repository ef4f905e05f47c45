//! Module for the `check` subcommand: a single oracle evaluation,
//! useful for verifying the entry invariant before a long reduction.

use crate::commands::{Command, OracleArgs, ReduceError};
use async_trait::async_trait;
use clap::Args;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use whittle_core::Outcome;

/// Arguments for the `check` subcommand.
#[derive(Args)]
pub struct CheckArgs {
    /// Input artifact file.
    pub input: PathBuf,

    #[command(flatten)]
    pub oracle: OracleArgs,
}

#[async_trait]
impl Command for CheckArgs {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        let text = fs::read_to_string(&self.input).map_err(ReduceError::from)?;
        let oracle = self.oracle.build()?;
        let outcome = oracle.evaluate(&text, &self.oracle.rule_catalog())?;

        println!("{}: {:?}", self.input.display(), outcome);
        match outcome {
            Outcome::Reproduced => Ok(()),
            _ => Err("condition did not reproduce".into()),
        }
    }
}
