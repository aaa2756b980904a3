//! Error types.
//!
//! Only configuration problems and malformed input from the host surface as errors. Everything
//! else (stale results, a cold term index, an unavailable spell predicate) is defined behavior
//! and is reported through [`EngineStatus`](crate::EngineStatus) instead.

use thiserror::Error;

#[derive(Debug, Error)]
/// Invalid engine configuration, detected when the engine is constructed.
pub enum ConfigError {
    #[error("trigger marker must not be empty")]
    /// The trigger marker string is empty.
    EmptyMarker,

    #[error("trigger lookback ({lookback} chars) is shorter than the marker ({marker_len} chars)")]
    /// The trigger lookback window cannot contain the marker.
    LookbackTooShort {
        /// Configured lookback in characters.
        lookback: usize,
        /// Marker length in characters.
        marker_len: usize,
    },

    #[error("{0} must be greater than zero")]
    /// A cap or width that must be positive was zero.
    Zero(&'static str),

    #[error("invalid word pattern '{pattern}': {source}")]
    /// The diagnostics tokenizer pattern failed to compile.
    WordPattern {
        /// The configured pattern.
        pattern: String,
        /// The regex compiler error.
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// An edit delta that does not fit the current document.
pub enum DeltaError {
    #[error("removed range {from}..{to} is inverted")]
    /// `from` is greater than `to`.
    InvertedRange {
        /// Start of the removed range.
        from: usize,
        /// End of the removed range.
        to: usize,
    },

    #[error("removed range {from}..{to} exceeds document length {len}")]
    /// The removed range ends past the end of the document.
    OutOfBounds {
        /// Start of the removed range.
        from: usize,
        /// End of the removed range.
        to: usize,
        /// Document length in characters.
        len: usize,
    },
}

#[derive(Debug, Error)]
/// Errors returned by the engine to its host.
pub enum CoreError {
    #[error("configuration error: {0}")]
    /// See [`ConfigError`].
    Config(#[from] ConfigError),

    #[error("malformed delta: {0}")]
    /// See [`DeltaError`].
    MalformedDelta(#[from] DeltaError),

    #[error("cursor offset {cursor} exceeds document length {len}")]
    /// A cursor offset past the end of the document.
    CursorOutOfBounds {
        /// Offending cursor offset.
        cursor: usize,
        /// Document length in characters.
        len: usize,
    },

    #[error("replacement span {from}..{to} is invalid for a document of {len} chars")]
    /// A replacement span that is inverted or past the end of the document.
    InvalidSpan {
        /// Span start.
        from: usize,
        /// Span end.
        to: usize,
        /// Document length in characters.
        len: usize,
    },

    #[error("no completion at index {0}")]
    /// The host selected a completion that is not in the current list.
    NoSuchCompletion(usize),
}
