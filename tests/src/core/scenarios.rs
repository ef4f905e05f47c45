//! End-to-end scenarios for the generic engine and the edit-span
//! complement trick, exercised through the public API.

use std::convert::Infallible;
use whittle_core::{apply_spans, ddmin, ddmin_complement, minus, EditSpan, Outcome};

#[test]
fn single_element_failure_cause() {
    let elements: Vec<String> = ["a", "b", "c", "d", "e", "f"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let reduced = ddmin(elements, 2, &mut |candidate: &[String]| {
        Ok::<_, Infallible>(if candidate.iter().any(|e| e == "d") {
            Outcome::Reproduced
        } else {
            Outcome::NotReproduced
        })
    })
    .unwrap();
    assert_eq!(reduced, vec!["d".to_string()]);
}

#[test]
fn one_minimality_is_exhaustive_on_small_fixtures() {
    // Reproduces iff the candidate contains every element of `needed`.
    for needed in [vec![3], vec![1, 6], vec![0, 4, 7]] {
        let test = |candidate: &[usize]| {
            Ok::<_, Infallible>(if needed.iter().all(|n| candidate.contains(n)) {
                Outcome::Reproduced
            } else {
                Outcome::NotReproduced
            })
        };
        let mut probe = test;
        let reduced = ddmin((0..8).collect(), 2, &mut probe).unwrap();
        assert_eq!(reduced, needed, "ddmin must find the exact cause set");

        // No single-element removal still reproduces.
        for i in 0..reduced.len() {
            let mut smaller = reduced.clone();
            smaller.remove(i);
            assert_ne!(test(&smaller).unwrap(), Outcome::Reproduced);
        }
    }
}

/// Five spans over `"aaaaa"`, each rewriting one `a` to `b`. The
/// condition survives only while positions 0, 2 and 4 keep their `a`,
/// i.e. those three spans stay unapplied.
#[test]
fn complement_trick_finds_minimal_exclusion_set() {
    let text = "aaaaa";
    let spans: Vec<EditSpan> = (0..5).map(|i| EditSpan::new(i, i + 1, "b")).collect();

    let mut test = |applied: &[EditSpan]| {
        let candidate = apply_spans(text, applied)?;
        let bytes = candidate.as_bytes();
        Ok::<_, whittle_core::Error>(
            if bytes[0] == b'a' && bytes[2] == b'a' && bytes[4] == b'a' {
                Outcome::Reproduced
            } else {
                Outcome::NotReproduced
            },
        )
    };

    let excluded = ddmin_complement(&spans, 1, &mut test).unwrap();
    assert_eq!(
        excluded,
        vec![
            EditSpan::new(0, 1, "b"),
            EditSpan::new(2, 3, "b"),
            EditSpan::new(4, 5, "b")
        ]
    );

    // Applying everything else is the maximal application.
    let kept = minus(&spans, &excluded);
    assert_eq!(apply_spans(text, &kept).unwrap(), "ababa");
}
