//! Core results and error types

use thiserror::Error;

/// Core error type encompassing all core module errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Edit spans must be ascending and non-overlapping.
    #[error("overlapping edit spans at offset {0}")]
    OverlappingSpans(usize),

    /// An edit span extends beyond the text it is applied to.
    #[error("edit span [{start}, {end}) out of bounds for text of length {len}")]
    SpanOutOfBounds {
        /// Span start offset.
        start: usize,
        /// Span end offset.
        end: usize,
        /// Length of the text being edited.
        len: usize,
    },
}

/// Core result type
pub type Result<T> = std::result::Result<T, Error>;
