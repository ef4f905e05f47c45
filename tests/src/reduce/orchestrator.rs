//! Full reduction runs through the fixed-point control loop.

use crate::support::{predicate_session, PredicateTransform};
use std::fs;
use tempfile::TempDir;
use whittle_oracle::Oracle;
use whittle_reduce::{reduce_artifact, Error, Session};

#[test]
fn refuses_an_artifact_that_does_not_reproduce() {
    let mut session = predicate_session(|t| t.contains("NEEDLE"));
    let result = reduce_artifact("plain haystack", &mut session);
    assert!(matches!(result, Err(Error::NotReproducible)));
}

#[test]
fn reduces_to_the_minimal_substring() {
    let mut session = predicate_session(|t| t.contains("MAGIC"));
    let input = "int noise;\nMAGIC\nmore noise\n";
    let result = reduce_artifact(input, &mut session).unwrap();

    assert_eq!(result.reduced, "MAGIC");
    assert_eq!(result.original_len, input.len());
    assert_eq!(result.reduced_len, result.reduced.len());
    assert!(result.rules_kept.is_empty());
    assert!(result.stats.probes > 0);
    assert!(result.stats.reproduced > 0);
}

#[test]
fn checkpoint_holds_the_final_text() {
    let dir = TempDir::new().unwrap();
    let best = dir.path().join("artifact-ddmin-latest");
    let mut session =
        predicate_session(|t| t.contains("MAGIC")).with_checkpoint(&best);

    let result = reduce_artifact("int noise;\nMAGIC\nmore noise\n", &mut session).unwrap();
    assert_eq!(fs::read_to_string(&best).unwrap(), result.reduced);
}

#[test]
fn already_minimal_input_is_a_one_cycle_fixed_point() {
    let mut session = predicate_session(|t| t.contains("MAGIC"));
    let result = reduce_artifact("MAGIC", &mut session).unwrap();
    assert_eq!(result.reduced, "MAGIC");
    assert_eq!(result.cycles, 1);
}

#[test]
fn rule_catalog_is_reduced_up_front() {
    // Reproduction depends only on rule r3 being active.
    let oracle = Oracle::new(Box::new(PredicateTransform(
        |_text: &str, rules: &[String]| rules.iter().any(|r| r == "r3"),
    )));
    let rules = vec!["r1".to_string(), "r2".to_string(), "r3".to_string()];
    let mut session = Session::new(oracle, rules);

    let result = reduce_artifact("x", &mut session).unwrap();
    assert_eq!(result.rules_kept, vec!["r3".to_string()]);
    assert_eq!(result.reduced, "x");
}
