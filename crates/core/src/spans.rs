//! Textual edit spans and their application.

use crate::result::{Error, Result};
use serde::Serialize;

/// A half-open byte range `[start, end)` in the original text plus the
/// replacement that goes in its place.
///
/// Spans produced by one proposer scan are non-overlapping and ascending
/// by offset; offsets always refer to the text the scan ran on, never to
/// partially edited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSpan {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
    /// Replacement text.
    pub replacement: String,
}

impl EditSpan {
    /// Creates a span replacing `[start, end)` with `replacement`.
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

/// Applies a subset of one scan's spans to the text they were proposed
/// against.
///
/// Spans must be ascending and non-overlapping; applying left to right
/// with a running cursor keeps later offsets consistent as earlier edits
/// shift the output.
pub fn apply_spans(text: &str, spans: &[EditSpan]) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for span in spans {
        if span.start < cursor {
            return Err(Error::OverlappingSpans(span.start));
        }
        if span.end > text.len() || span.start > span.end {
            return Err(Error::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len: text.len(),
            });
        }
        out.push_str(&text[cursor..span.start]);
        out.push_str(&span.replacement);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}
