//! The individual minimization stages the orchestrator sequences.
//!
//! Every stage takes the current best-known text, probes candidates
//! through the [`Session`], and returns a weakly-smaller text that still
//! reproduces (or the input unchanged).

use crate::session::Session;
use crate::Result;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;
use whittle_core::granularity::{join_chars, join_lines, split_chars, split_lines};
use whittle_core::propose::{battery, propose};
use whittle_core::spans::{apply_spans, EditSpan};
use whittle_core::{ddmin, ddmin_complement, minus, Outcome};

macro_rules! stage_regex {
    ($name:ident, $pattern:literal) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("stage pattern is a valid regex"))
        }
    };
}

stage_regex!(leading_ws, r"(?m)^[ \t]+");
stage_regex!(trailing_ws, r"(?m)[ \t]+$");
stage_regex!(ws_runs, r"[ \t]+");
stage_regex!(open_brace_eol, r"(?m)\{$");
stage_regex!(close_brace, r"\}");
stage_regex!(paren_then_word, r"\)(\s*[A-Za-z_])");
stage_regex!(blank_runs, r"\n\n+");

/// Strips per-line leading horizontal whitespace.
pub fn strip_leading_whitespace(text: &str) -> String {
    leading_ws().replace_all(text, "").into_owned()
}

/// Strips per-line trailing horizontal whitespace.
pub fn strip_trailing_whitespace(text: &str) -> String {
    trailing_ws().replace_all(text, "").into_owned()
}

/// Collapses runs of horizontal whitespace to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    ws_runs().replace_all(text, " ").into_owned()
}

/// Inserts a newline before `{` at line end, after `}`, and after `)`
/// when it is followed (possibly across whitespace) by a letter or
/// underscore, then collapses blank-line runs.
pub fn break_lines(text: &str) -> String {
    let text = open_brace_eol().replace_all(text, "\n{");
    let text = close_brace().replace_all(&text, "}\n");
    let text = paren_then_word().replace_all(&text, ")\n$1");
    blank_runs().replace_all(&text, "\n").into_owned()
}

/// Tries one candidate rewrite, keeping it only if it still reproduces.
fn try_keep(
    current: String,
    candidate: String,
    session: &mut Session,
) -> Result<String> {
    if candidate != current && session.probe(&candidate)? == Outcome::Reproduced {
        Ok(candidate)
    } else {
        Ok(current)
    }
}

/// Whitespace normalization: independently tries leading strip, trailing
/// strip and run collapsing, keeping each only if it reproduces.
pub fn normalize_whitespace(text: String, session: &mut Session) -> Result<String> {
    let mut current = text;
    current = try_keep(current.clone(), strip_leading_whitespace(&current), session)?;
    current = try_keep(current.clone(), strip_trailing_whitespace(&current), session)?;
    current = try_keep(current.clone(), collapse_whitespace(&current), session)?;
    Ok(current)
}

/// Line splitting, kept only if the split text still reproduces.
pub fn split_stage(text: String, session: &mut Session) -> Result<String> {
    try_keep(text.clone(), break_lines(&text), session)
}

/// ddmin over the line adapter, granularity 2.
///
/// Returns the input untouched when no line could be removed; re-joining
/// an unreduced split would append a trailing newline the oracle never
/// approved.
pub fn minimize_lines(text: String, session: &mut Session) -> Result<String> {
    let lines = split_lines(&text);
    let count = lines.len();
    let reduced = ddmin(lines, 2, &mut |candidate: &[String]| {
        session.probe(&join_lines(candidate))
    })?;
    if reduced.len() == count {
        Ok(text)
    } else {
        Ok(join_lines(&reduced))
    }
}

/// ddmin over the char adapter, granularity 2.
pub fn minimize_chars(text: String, session: &mut Session) -> Result<String> {
    let chars = split_chars(&text);
    let reduced = ddmin(chars, 2, &mut |candidate: &[char]| {
        session.probe(&join_chars(candidate))
    })?;
    Ok(join_chars(&reduced))
}

/// Token-edit minimization: for each battery rule in order, propose
/// spans on the current text, find the minimal exclusion set via the
/// complement trick, and apply the remainder in one pass.
pub fn minimize_tokens(text: String, session: &mut Session) -> Result<String> {
    let mut current = text;
    for rule in battery() {
        let spans = propose(&current, rule);
        if spans.is_empty() {
            continue;
        }
        debug!(rule = rule.name, proposed = spans.len(), "token pass");
        let excluded = {
            let base = current.as_str();
            ddmin_complement(&spans, 1, &mut |applied: &[EditSpan]| {
                let candidate = apply_spans(base, applied)?;
                session.probe(&candidate)
            })?
        };
        let kept = minus(&spans, &excluded);
        if !kept.is_empty() {
            debug!(rule = rule.name, applied = kept.len(), "token pass applied");
            current = apply_spans(&current, &kept)?;
        }
    }
    Ok(current)
}
