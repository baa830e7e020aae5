//! Error kinds raised by the comparison algorithms.

/// Errors returned by the core comparison functions.
///
/// Validation happens at function entry, before any partial computation, and
/// every error propagates to the caller unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// A count or length parameter that must be a positive integer is zero.
    #[error("{name} ({value}) should be a positive integer")]
    InvalidParameter { name: &'static str, value: usize },

    /// A string is empty, shorter than one token, or its length is not a
    /// multiple of the reading frame.
    #[error("string {string:?} is not compatible with a reading frame of {reading_frame}")]
    IncompatibleLength {
        string: String,
        reading_frame: usize,
    },

    /// A string contains non-ASCII data, so fixed-width byte slicing does not
    /// yield a token sequence.
    #[error("string {string:?} is not a plain ASCII token sequence")]
    NotTokenizable { string: String },

    /// A token has no entry in the duration table.
    #[error("no duration entry for token {token:?}")]
    MissingDuration { token: String },
}
