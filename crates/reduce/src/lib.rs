//! Reduction orchestration: a fixed-point control loop that applies
//! whitespace normalization, line splitting, line minimization,
//! token-edit minimization and character minimization in order until a
//! full cycle changes nothing.

pub mod orchestrator;
pub mod session;
pub mod stages;

pub use orchestrator::{reduce_artifact, ReductionResult};
pub use session::{ProbeStats, Session};

use thiserror::Error;

/// Reduction error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Entry-invariant violation: the initial artifact does not
    /// reproduce the condition, so there is nothing to minimize.
    #[error("cannot start: initial artifact does not reproduce the condition")]
    NotReproducible,

    /// Span bookkeeping failed; indicates a proposer bug.
    #[error("edit span error: {0}")]
    Span(#[from] whittle_core::Error),

    /// The oracle failed fatally (I/O, spawn).
    #[error("oracle failure: {0}")]
    Oracle(#[from] whittle_oracle::Error),

    /// Failed to persist the best-known-reduced artifact. Fatal: the
    /// "progress survives termination" guarantee is gone.
    #[error("could not write checkpoint '{path}': {source}")]
    Checkpoint {
        /// Checkpoint file path.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Reduction result type
pub type Result<T> = std::result::Result<T, Error>;
