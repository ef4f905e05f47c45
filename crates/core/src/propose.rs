//! Token-edit proposer: a fixed battery of regex heuristics that propose
//! non-overlapping textual replacements as edit spans.
//!
//! Each rule scans the current text and turns its matches into
//! [`EditSpan`]s; the reducer then searches for the minimal set of spans
//! that must stay *unapplied* (see [`crate::ddmin::ddmin_complement`]) and
//! applies the rest in one pass. Rules are heuristics over source-like
//! text, not a parser; a replacement that breaks the candidate simply
//! fails to reproduce and is dropped by the search.
//!
//! Boundary constraints that would naturally be look-behinds are
//! expressed as explicit preceding-character checks, since the `regex`
//! crate has no look-around.

use crate::spans::EditSpan;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Keywords and literals never proposed for replacement.
const RESERVED: [&str; 7] = ["if", "return", "while", "do", "true", "false", "null"];

/// Return statement with a non-trivial body. The char class after
/// `return` keeps it from eating identifiers like `returned`.
const RETURN_BODY: &str = r"return[^a-z;][^;]+;";
/// Assignment right-hand side up to the statement end (also matches
/// comparisons; harmless, the oracle rejects bad rewrites).
const ASSIGN_RHS: &str = r"=[^;]+;";
/// Angle-bracket group that is plausibly a generic parameter list.
const GENERIC_PARAM: &str = r"<[a-zA-Z_0-9?]+>";
/// Capitalized identifier, heuristically a type name. ASCII only.
const TYPE_NAME: &str = r"[A-Z][a-zA-Z_0-9]*";
/// Lowercase identifier of length >= 3. Matches more than variable
/// names; the reserved set and the oracle sort it out.
const IDENT: &str = r"[a-z_][a-zA-Z_0-9]{2,}";

/// Constraint on the character immediately before a match, standing in
/// for a negative look-behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// No constraint.
    Free,
    /// Previous char must not be a lowercase letter or `"`.
    NotLowerOrQuote,
    /// Previous char must not be a word character or `"`.
    NotWordOrQuote,
}

/// One rule of the proposer battery.
#[derive(Debug)]
pub struct TokenRule {
    /// Rule name for logging and the `spans` debug command.
    pub name: &'static str,
    /// Fixed replacement for every matched span.
    pub replacement: &'static str,
    pattern: &'static str,
    boundary: Boundary,
}

/// The fixed, ordered rule battery. Each pass is run to completion
/// before the next one scans the edited text.
pub fn battery() -> &'static [TokenRule] {
    const BATTERY: [TokenRule; 9] = [
        TokenRule {
            name: "return-null",
            replacement: "return null;",
            pattern: RETURN_BODY,
            boundary: Boundary::NotLowerOrQuote,
        },
        TokenRule {
            name: "return-true",
            replacement: "return true;",
            pattern: RETURN_BODY,
            boundary: Boundary::NotLowerOrQuote,
        },
        TokenRule {
            name: "return-one",
            replacement: "return 1;",
            pattern: RETURN_BODY,
            boundary: Boundary::NotLowerOrQuote,
        },
        TokenRule {
            name: "assign-null",
            replacement: "=null;",
            pattern: ASSIGN_RHS,
            boundary: Boundary::Free,
        },
        TokenRule {
            name: "assign-true",
            replacement: "=true;",
            pattern: ASSIGN_RHS,
            boundary: Boundary::Free,
        },
        TokenRule {
            name: "assign-one",
            replacement: "=1;",
            pattern: ASSIGN_RHS,
            boundary: Boundary::Free,
        },
        TokenRule {
            name: "generic-param",
            replacement: " ",
            pattern: GENERIC_PARAM,
            boundary: Boundary::Free,
        },
        TokenRule {
            name: "type-name",
            replacement: "Object",
            pattern: TYPE_NAME,
            boundary: Boundary::NotLowerOrQuote,
        },
        TokenRule {
            name: "ident",
            replacement: "q",
            pattern: IDENT,
            boundary: Boundary::NotWordOrQuote,
        },
    ];
    &BATTERY
}

fn compiled(pattern: &'static str) -> &'static Regex {
    static COMPILED: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();
    let map = COMPILED.get_or_init(|| {
        battery()
            .iter()
            .map(|rule| {
                (
                    rule.pattern,
                    Regex::new(rule.pattern).expect("battery pattern is a valid regex"),
                )
            })
            .collect()
    });
    &map[pattern]
}

fn boundary_ok(text: &str, start: usize, boundary: Boundary) -> bool {
    let prev = text[..start].chars().next_back();
    match boundary {
        Boundary::Free => true,
        Boundary::NotLowerOrQuote => !prev.is_some_and(|c| c.is_ascii_lowercase() || c == '"'),
        Boundary::NotWordOrQuote => {
            !prev.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '"')
        }
    }
}

/// Scans `text` with one rule and returns its matches as edit spans,
/// ascending and non-overlapping.
pub fn propose(text: &str, rule: &TokenRule) -> Vec<EditSpan> {
    compiled(rule.pattern)
        .find_iter(text)
        .filter(|m| boundary_ok(text, m.start(), rule.boundary))
        .filter(|m| !RESERVED.contains(&m.as_str()))
        .map(|m| EditSpan::new(m.start(), m.end(), rule.replacement))
        .collect()
}
