//! Granularity adapters: split a textual artifact into element sequences
//! and reassemble reduced sequences back into text.
//!
//! The line adapter works on newline-terminated artifacts: `join_lines`
//! appends `\n` after every line including the last, so
//! `join_lines(&split_lines(text)) == text` holds whenever `text` ends in
//! a newline (the orchestrator normalizes input into that shape). The
//! char adapter is lossless for any input.

/// Splits text on line boundaries into a list of line strings.
///
/// There is no trailing empty element for the final newline.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Reassembles lines, appending `\n` after every line including the last.
pub fn join_lines(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// One element per character, order preserved.
pub fn split_chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Concatenates characters back into text.
pub fn join_chars(chars: &[char]) -> String {
    chars.iter().collect()
}
