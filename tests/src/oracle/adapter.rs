//! Step-order precedence of the oracle adapter: each optional check must
//! fire at its documented position relative to the transform.

use crate::support::{predicate_oracle, PredicateTransform};
use regex::Regex;
use whittle_core::Outcome;
use whittle_oracle::{Applied, ExternalCheck, Oracle, Transform, TransformError};

/// Transform that always crashes with a recognizable message.
struct Crashing;

impl Transform for Crashing {
    fn name(&self) -> &str {
        "crashing"
    }

    fn apply(&self, _text: &str, _rules: &[String]) -> Result<Applied, TransformError> {
        Err(TransformError::new("exploded: stack overflow"))
    }
}

fn crashing_oracle() -> Oracle {
    let mut oracle = Oracle::new(Box::new(Crashing));
    oracle.expected_error = Some(Regex::new("stack overflow").unwrap());
    oracle
}

#[test]
fn precondition_runs_before_the_transform() {
    // Baseline: the crash matches the expected error, so it reproduces.
    let mut oracle = crashing_oracle();
    assert_eq!(oracle.evaluate("anything", &[]).unwrap(), Outcome::Reproduced);

    // A failing precondition must win over the would-be crash.
    oracle.precondition = Some(Regex::new("present").unwrap());
    assert_eq!(
        oracle.evaluate("anything", &[]).unwrap(),
        Outcome::NotReproduced
    );
    assert_eq!(
        oracle.evaluate("present anything", &[]).unwrap(),
        Outcome::Reproduced
    );
}

#[test]
fn precheck_runs_before_the_transform() {
    let mut oracle = crashing_oracle();
    oracle.precheck = Some(ExternalCheck::new("/bin/false"));
    assert_eq!(
        oracle.evaluate("anything", &[]).unwrap(),
        Outcome::NotReproduced
    );

    oracle.precheck = Some(ExternalCheck::new("/bin/true"));
    assert_eq!(oracle.evaluate("anything", &[]).unwrap(), Outcome::Reproduced);
}

#[test]
fn expected_error_makes_a_clean_run_fail() {
    // The transform succeeds, so the defect under investigation (the
    // crash) is gone, no matter what later checks would say.
    let mut oracle = predicate_oracle(|_| true);
    oracle.expected_error = Some(Regex::new("stack overflow").unwrap());
    oracle.postcondition = Some(Regex::new(".*").unwrap());
    assert_eq!(
        oracle.evaluate("anything", &[]).unwrap(),
        Outcome::NotReproduced
    );
}

#[test]
fn no_effect_is_unknown_despite_postconditions() {
    let mut oracle = predicate_oracle(|_| false);
    oracle.postcondition = Some(Regex::new(".*").unwrap());
    oracle.verifier = Some(ExternalCheck::new("/bin/true"));
    assert_eq!(oracle.evaluate("anything", &[]).unwrap(), Outcome::Unknown);
}

#[test]
fn verifier_gates_reproduction() {
    let mut oracle = predicate_oracle(|_| true);
    oracle.verifier = Some(ExternalCheck::new("/bin/false"));
    assert_eq!(
        oracle.evaluate("anything", &[]).unwrap(),
        Outcome::NotReproduced
    );

    oracle.verifier = Some(ExternalCheck::new("/bin/true"));
    assert_eq!(oracle.evaluate("anything", &[]).unwrap(), Outcome::Reproduced);
}

#[test]
fn rules_reach_the_transform() {
    let oracle = Oracle::new(Box::new(PredicateTransform(
        |_text: &str, rules: &[String]| rules.iter().any(|r| r == "on"),
    )));
    let rules = vec!["off".to_string(), "on".to_string()];
    assert_eq!(oracle.evaluate("x", &rules).unwrap(), Outcome::Reproduced);
    assert_eq!(oracle.evaluate("x", &[]).unwrap(), Outcome::Unknown);
}
