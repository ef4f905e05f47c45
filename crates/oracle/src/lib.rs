//! Oracle adapter: turns the side-effecting verification machinery into a
//! pure-looking `&str -> Outcome` evaluation.
//!
//! An [`Oracle`] is an explicit, ordered list of declarative verification
//! steps over an in-memory candidate: an optional precondition regex, an
//! optional external precheck, the opaque transformation itself, an
//! optional expected-error pattern, and optional postconditions (regex
//! and/or external verifier). The candidate on disk is never the input
//! artifact; external steps see a materialized temp copy only.
//!
//! Mid-search failures (a transform crash, a failing check) only steer
//! the search and never abort it; only I/O and spawn failures are fatal.

pub mod command;

pub use command::{CommandTransform, ExternalCheck};

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};
use whittle_core::Outcome;

/// Oracle error type. Everything here is fatal to the session: once the
/// oracle cannot materialize or inspect a candidate, verdicts are
/// meaningless.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to materialize a candidate to a temp file.
    #[error("could not materialize candidate: {0}")]
    Materialize(#[source] std::io::Error),

    /// Failed to spawn or wait for an external program.
    #[error("could not run '{program}': {source}")]
    Spawn {
        /// The program that failed to run.
        program: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read back a transformed candidate.
    #[error("could not read back transformed candidate: {0}")]
    ReadBack(#[source] std::io::Error),
}

/// Oracle result type
pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal failure of the opaque transformation on one candidate.
///
/// The rendered message is what the expected-error pattern is matched
/// against, so implementations should include everything an operator
/// would grep for (exit status, stderr, exception text).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransformError {
    /// Human-readable failure description.
    pub message: String,
}

impl TransformError {
    /// Creates a transform error from any displayable failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Whether the transformation observably changed the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The transform produced this new text.
    Changed(String),
    /// The transform ran but had no observable effect.
    Unchanged,
}

/// The opaque transformation invoked once per candidate.
///
/// `rules` is the active sub-list of the caller's opaque rule catalog, in
/// original relative order; implementations that have no notion of rules
/// may ignore it.
pub trait Transform: Send + Sync {
    /// Transform name for logging.
    fn name(&self) -> &str;

    /// Applies the transformation to `text`.
    ///
    /// A crash of the transformation is a [`TransformError`], not a fatal
    /// error; the oracle matches it against the expected-error pattern.
    fn apply(&self, text: &str, rules: &[String]) -> std::result::Result<Applied, TransformError>;
}

/// Ordered verification steps deciding one candidate.
pub struct Oracle {
    /// Candidate text must match before the transform is invoked.
    pub precondition: Option<Regex>,
    /// External precheck on the materialized candidate; nonzero exit
    /// rejects the candidate without invoking the transform.
    pub precheck: Option<ExternalCheck>,
    /// The opaque transformation.
    pub transform: Box<dyn Transform>,
    /// When set, the defect under investigation is the transform crash
    /// itself: a crash matching this pattern reproduces, anything else
    /// (including a clean run) does not.
    pub expected_error: Option<Regex>,
    /// Transformed text must match for the candidate to reproduce.
    pub postcondition: Option<Regex>,
    /// External verifier on the materialized transformed text; exit 0 =
    /// pass.
    pub verifier: Option<ExternalCheck>,
}

impl Oracle {
    /// Creates an oracle with only the transform step; the optional
    /// checks default to absent.
    pub fn new(transform: Box<dyn Transform>) -> Self {
        Self {
            precondition: None,
            precheck: None,
            transform,
            expected_error: None,
            postcondition: None,
            verifier: None,
        }
    }

    /// Evaluates one candidate against the full step list.
    ///
    /// Regex checks use substring semantics; anchor the pattern if a
    /// full match is wanted.
    pub fn evaluate(&self, text: &str, rules: &[String]) -> Result<Outcome> {
        if let Some(pattern) = &self.precondition {
            if !pattern.is_match(text) {
                debug!("oracle: precondition rejected candidate");
                return Ok(Outcome::NotReproduced);
            }
        }

        if let Some(check) = &self.precheck {
            if !check.run(text)? {
                debug!("oracle: precheck rejected candidate");
                return Ok(Outcome::NotReproduced);
            }
        }

        let transformed = match self.transform.apply(text, rules) {
            Ok(Applied::Changed(out)) => out,
            Ok(Applied::Unchanged) => {
                debug!(transform = self.transform.name(), "oracle: transform had no effect");
                return Ok(Outcome::Unknown);
            }
            Err(err) => {
                let rendered = err.to_string();
                return match &self.expected_error {
                    Some(pattern) if pattern.is_match(&rendered) => Ok(Outcome::Reproduced),
                    _ => {
                        warn!(
                            transform = self.transform.name(),
                            error = %rendered,
                            "oracle: transform failed without matching the expected error"
                        );
                        Ok(Outcome::NotReproduced)
                    }
                };
            }
        };

        // The defect is the crash; a clean transform means it is gone.
        if self.expected_error.is_some() {
            return Ok(Outcome::NotReproduced);
        }

        if let Some(pattern) = &self.postcondition {
            if !pattern.is_match(&transformed) {
                return Ok(Outcome::NotReproduced);
            }
        }

        if let Some(check) = &self.verifier {
            if !check.run(&transformed)? {
                return Ok(Outcome::NotReproduced);
            }
        }

        Ok(Outcome::Reproduced)
    }
}

impl std::fmt::Debug for Oracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Oracle")
            .field("precondition", &self.precondition.as_ref().map(Regex::as_str))
            .field("precheck", &self.precheck)
            .field("transform", &self.transform.name())
            .field("expected_error", &self.expected_error.as_ref().map(Regex::as_str))
            .field("postcondition", &self.postcondition.as_ref().map(Regex::as_str))
            .field("verifier", &self.verifier)
            .finish()
    }
}
