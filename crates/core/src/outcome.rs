//! Tri-state verdict returned by the oracle for a candidate.

use serde::{Deserialize, Serialize};

/// Result of testing one candidate against the condition under
/// investigation.
///
/// Only [`Outcome::Reproduced`] licenses keeping a reduction. `Unknown`
/// means the oracle could not decide (for example the transform had no
/// observable effect on the candidate); the search logs it and moves on,
/// it is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The condition still holds for the candidate.
    Reproduced,
    /// The condition does not hold for the candidate.
    NotReproduced,
    /// The oracle could not decide either way.
    Unknown,
}

impl Outcome {
    /// True only for [`Outcome::Reproduced`].
    #[inline]
    pub fn is_reproduced(self) -> bool {
        matches!(self, Outcome::Reproduced)
    }
}
