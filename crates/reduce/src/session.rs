//! Probe session: wraps the oracle with the side effects the search
//! needs — progress checkpointing and probe accounting.
//!
//! The oracle itself stays pure; persisting the best-known-reduced
//! artifact after every `Reproduced` verdict is the session's job, so an
//! abnormal termination loses at most the work since the last verdict.

use crate::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use whittle_core::Outcome;
use whittle_oracle::Oracle;

/// Probe counters, reported at the end of a run.
///
/// There is no upper bound on probe count or wall-clock time; an oracle
/// that keeps answering `Unknown` stalls progress without raising an
/// error, so the counters are the operator's visibility into that.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ProbeStats {
    /// Total oracle invocations.
    pub probes: u64,
    /// Verdicts that licensed keeping a reduction.
    pub reproduced: u64,
    /// Verdicts the oracle could not decide.
    pub unknown: u64,
}

/// One reduction session: the oracle, the active rule list and the
/// checkpoint side file.
///
/// Single-threaded and synchronous; one oracle call in flight at a time.
pub struct Session {
    oracle: Oracle,
    rules: Vec<String>,
    checkpoint: Option<PathBuf>,
    stats: ProbeStats,
}

impl Session {
    /// Creates a session over `oracle` with the full rule catalog.
    pub fn new(oracle: Oracle, rules: Vec<String>) -> Self {
        Self {
            oracle,
            rules,
            checkpoint: None,
            stats: ProbeStats::default(),
        }
    }

    /// Persist every reproducing candidate to `path`.
    pub fn with_checkpoint(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkpoint = Some(path.into());
        self
    }

    /// The active rule sub-list, in original relative order.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Replaces the active rule list (after rule-subset reduction).
    pub fn set_rules(&mut self, rules: Vec<String>) {
        self.rules = rules;
    }

    /// Probe counters so far.
    pub fn stats(&self) -> ProbeStats {
        self.stats
    }

    /// Evaluates one candidate with the active rules.
    pub fn probe(&mut self, text: &str) -> Result<Outcome> {
        let outcome = self.oracle.evaluate(text, &self.rules)?;
        self.record(text, outcome)?;
        Ok(outcome)
    }

    /// Evaluates one candidate with an explicit rule sub-list (used by
    /// rule-subset reduction).
    pub fn probe_with_rules(&mut self, text: &str, rules: &[String]) -> Result<Outcome> {
        let outcome = self.oracle.evaluate(text, rules)?;
        self.record(text, outcome)?;
        Ok(outcome)
    }

    fn record(&mut self, text: &str, outcome: Outcome) -> Result<()> {
        self.stats.probes += 1;
        match outcome {
            Outcome::Reproduced => {
                self.stats.reproduced += 1;
                if let Some(path) = &self.checkpoint {
                    fs::write(path, text).map_err(|source| Error::Checkpoint {
                        path: path.display().to_string(),
                        source,
                    })?;
                }
            }
            Outcome::Unknown => {
                self.stats.unknown += 1;
                debug!(probe = self.stats.probes, "oracle could not decide candidate");
            }
            Outcome::NotReproduced => {}
        }
        if self.stats.probes % 500 == 0 {
            info!(
                probes = self.stats.probes,
                reproduced = self.stats.reproduced,
                unknown = self.stats.unknown,
                "search progress"
            );
        }
        Ok(())
    }
}
