//! The fixed-point control loop over the minimization stages.
//!
//! State machine: WhitespaceNormalize → LineSplit → {LineMinimize ⇄
//! TokenMinimize} inner loop until neither changes the text →
//! CharacterMinimize → restart from WhitespaceNormalize, terminating
//! once a full outer cycle produces byte-identical text.

use crate::session::{ProbeStats, Session};
use crate::stages::{
    minimize_chars, minimize_lines, minimize_tokens, normalize_whitespace, split_stage,
};
use crate::{Error, Result};
use serde::Serialize;
use tracing::{debug, info};
use whittle_core::{ddmin, Outcome};

/// Outcome of one reduction run, serialized for `--emit`.
#[derive(Debug, Clone, Serialize)]
pub struct ReductionResult {
    /// The minimized artifact.
    pub reduced: String,
    /// Input size in bytes.
    pub original_len: usize,
    /// Output size in bytes.
    pub reduced_len: usize,
    /// Full outer cycles until the fixed point.
    pub cycles: usize,
    /// Rule sub-list that survived rule-subset reduction.
    pub rules_kept: Vec<String>,
    /// Oracle probe accounting.
    pub stats: ProbeStats,
}

/// Reduces `text` to a locally minimal artifact that still reproduces.
///
/// Verifies the entry invariant first: the initial artifact must
/// reproduce, otherwise the session aborts with
/// [`Error::NotReproducible`]. Rule-subset reduction runs once up front;
/// all later stages use the surviving sub-list.
pub fn reduce_artifact(text: &str, session: &mut Session) -> Result<ReductionResult> {
    if session.probe(text)? != Outcome::Reproduced {
        return Err(Error::NotReproducible);
    }

    reduce_rules(text, session)?;

    let mut current = text.to_string();
    let mut cycles = 0usize;
    loop {
        let cycle_start = current.clone();

        current = normalize_whitespace(current, session)?;
        current = split_stage(current, session)?;

        // Lines and token edits feed each other: a removed line exposes
        // new token matches and vice versa.
        loop {
            let before = current.clone();
            current = minimize_lines(current, session)?;
            current = minimize_tokens(current, session)?;
            if current == before {
                break;
            }
        }

        current = minimize_chars(current, session)?;

        cycles += 1;
        debug!(cycle = cycles, len = current.len(), "outer cycle finished");
        if current == cycle_start {
            break;
        }
    }

    let stats = session.stats();
    info!(
        original = text.len(),
        reduced = current.len(),
        cycles,
        probes = stats.probes,
        "reduction reached fixed point"
    );

    Ok(ReductionResult {
        original_len: text.len(),
        reduced_len: current.len(),
        cycles,
        rules_kept: session.rules().to_vec(),
        stats,
        reduced: current,
    })
}

/// ddmin over the rule catalog (granularity 2), probing against the
/// unmodified artifact. A catalog of one is kept as-is.
fn reduce_rules(text: &str, session: &mut Session) -> Result<()> {
    let rules = session.rules().to_vec();
    if rules.len() <= 1 {
        return Ok(());
    }
    let reduced = ddmin(rules.clone(), 2, &mut |subset: &[String]| {
        session.probe_with_rules(text, subset)
    })?;
    if reduced.len() < rules.len() {
        info!(from = rules.len(), to = reduced.len(), "reduced rule catalog");
    } else {
        debug!(rules = rules.len(), "rule catalog could not be reduced");
    }
    session.set_rules(reduced);
    Ok(())
}
