//! Stage-level behavior: whitespace normalization, line splitting and
//! the token-edit battery, driven through predicate sessions.

use crate::support::{always_session, predicate_session};
use whittle_reduce::stages::{
    break_lines, minimize_lines, minimize_tokens, normalize_whitespace, split_stage,
};

#[test]
fn normalization_strips_indentation_when_allowed() {
    let mut session = always_session();
    let out = normalize_whitespace(" \tabc\n\t\tdef\n".to_string(), &mut session).unwrap();
    assert_eq!(out, "abc\ndef\n");
}

#[test]
fn normalization_strips_trailing_whitespace() {
    let mut session = always_session();
    let out = normalize_whitespace("abc \t\ndef  \n".to_string(), &mut session).unwrap();
    assert_eq!(out, "abc\ndef\n");
}

#[test]
fn normalization_keeps_whitespace_the_condition_needs() {
    // The condition depends on a literal tab surviving.
    let mut session = predicate_session(|t| t.contains('\t'));
    let out = normalize_whitespace(" \tabc\n".to_string(), &mut session).unwrap();
    assert_eq!(out, " \tabc\n");
}

#[test]
fn line_breaking_splits_after_call_chains() {
    assert_eq!(break_lines("@hello()world()"), "@hello()\nworld()");
}

#[test]
fn line_breaking_splits_around_braces() {
    assert_eq!(break_lines("void m() {\nbody();}"), "void m() \n{\nbody();}\n");
}

#[test]
fn split_stage_is_dropped_when_it_breaks_reproduction() {
    let mut session = predicate_session(|t| !t.contains('\n'));
    let out = split_stage("@hello()world()".to_string(), &mut session).unwrap();
    assert_eq!(out, "@hello()world()");
}

#[test]
fn line_minimization_keeps_a_scattered_pair() {
    let mut session = predicate_session(|t| t.contains("keep1") && t.contains("keep2"));
    let text = "aaa\nkeep1\nbbb\nkeep2\nccc\n".to_string();
    let out = minimize_lines(text, &mut session).unwrap();
    assert_eq!(out, "keep1\nkeep2\n");
}

#[test]
fn line_minimization_leaves_irreducible_text_untouched() {
    let mut session = predicate_session(|t| t.contains("keep"));
    let out = minimize_lines("keep".to_string(), &mut session).unwrap();
    // In particular no trailing newline is invented.
    assert_eq!(out, "keep");
}

#[test]
fn token_battery_simplifies_a_return_body() {
    let mut session = always_session();
    let out = minimize_tokens("{return a;}".to_string(), &mut session).unwrap();
    assert_eq!(out, "{return 1;}");
}

#[test]
fn token_battery_simplifies_an_assignment() {
    let mut session = always_session();
    let out = minimize_tokens("{String s = \"asdf\";}".to_string(), &mut session).unwrap();
    assert_eq!(out, "{Object s =1;}");
}

#[test]
fn token_battery_shortens_identifiers() {
    let mut session = always_session();
    let out = minimize_tokens("a(Object...reference) {}".to_string(), &mut session).unwrap();
    assert_eq!(out, "a(Object...q) {}");
}

#[test]
fn token_battery_skips_rewrites_the_condition_rejects() {
    // The condition tolerates neither `null` nor `true`, so only the
    // third return rule can land.
    let mut session = predicate_session(|t| !t.contains("null") && !t.contains("true"));
    let out = minimize_tokens("{return a;}".to_string(), &mut session).unwrap();
    assert_eq!(out, "{return 1;}");
}
