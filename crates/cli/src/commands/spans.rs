//! Module for the `spans` subcommand: dumps the token-edit spans the
//! proposer battery would suggest for an artifact, per rule. Debug aid
//! for judging what token minimization can reach before paying for
//! oracle calls.

use crate::commands::{Command, ReduceError};
use async_trait::async_trait;
use clap::Args;
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use whittle_core::propose::{battery, propose};
use whittle_core::EditSpan;

/// Arguments for the `spans` subcommand.
#[derive(Args)]
pub struct SpansArgs {
    /// Input artifact file.
    pub input: PathBuf,

    /// Only show this rule (e.g. `ident`, `return-one`).
    #[arg(long)]
    pub rule: Option<String>,

    /// Path to emit the proposed spans as JSON.
    #[arg(long, value_name = "PATH")]
    pub emit: Option<PathBuf>,
}

#[derive(Serialize)]
struct RuleSpans {
    rule: &'static str,
    replacement: &'static str,
    spans: Vec<EditSpan>,
}

#[async_trait]
impl Command for SpansArgs {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        let text = fs::read_to_string(&self.input).map_err(ReduceError::from)?;

        let mut all = Vec::new();
        for rule in battery() {
            if self.rule.as_deref().is_some_and(|only| only != rule.name) {
                continue;
            }
            let spans = propose(&text, rule);
            if spans.is_empty() {
                continue;
            }
            println!("{} ({} spans, -> {:?}):", rule.name, spans.len(), rule.replacement);
            for span in &spans {
                println!(
                    "    [{}, {}) {:?}",
                    span.start,
                    span.end,
                    &text[span.start..span.end]
                );
            }
            all.push(RuleSpans {
                rule: rule.name,
                replacement: rule.replacement,
                spans,
            });
        }

        if let Some(path) = self.emit.as_ref() {
            fs::write(path, serde_json::to_string_pretty(&all).map_err(ReduceError::from)?)
                .map_err(ReduceError::from)?;
            println!("Wrote span report to {}", path.display());
        }
        Ok(())
    }
}
