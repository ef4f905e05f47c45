//! Shared fixtures: predicate-backed transforms and sessions.

use whittle_oracle::{Applied, Oracle, Transform, TransformError};
use whittle_reduce::Session;

/// Transform whose behavior is a pure predicate over the candidate:
/// when the predicate holds it reports an (identity) change, otherwise
/// no effect — so an oracle with no further checks reproduces exactly
/// when the predicate holds.
pub struct PredicateTransform<F>(pub F);

impl<F> Transform for PredicateTransform<F>
where
    F: Fn(&str, &[String]) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        "predicate"
    }

    fn apply(&self, text: &str, rules: &[String]) -> Result<Applied, TransformError> {
        if (self.0)(text, rules) {
            Ok(Applied::Changed(text.to_string()))
        } else {
            Ok(Applied::Unchanged)
        }
    }
}

/// Oracle reproducing exactly when `pred` holds for the candidate text.
pub fn predicate_oracle<F>(pred: F) -> Oracle
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Oracle::new(Box::new(PredicateTransform(
        move |text: &str, _rules: &[String]| pred(text),
    )))
}

/// Session over [`predicate_oracle`] with an empty rule catalog.
pub fn predicate_session<F>(pred: F) -> Session
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Session::new(predicate_oracle(pred), Vec::new())
}

/// Session reproducing every candidate.
pub fn always_session() -> Session {
    predicate_session(|_| true)
}
