//! Fixed-width tokenization of symbolic strings.
//!
//! A string is read in consecutive chunks of `reading_frame` bytes; each
//! chunk is one token, the atomic unit every comparison operates on. With a
//! reading frame of 1 this is plain per-character iteration.

use crate::error::MatchError;

/// Checks that a count or length parameter is a positive integer.
pub(crate) fn check_positive(name: &'static str, value: usize) -> Result<(), MatchError> {
    if value == 0 {
        return Err(MatchError::InvalidParameter { name, value });
    }
    Ok(())
}

/// Checks that `s` splits into whole tokens under `reading_frame`.
///
/// The string must be plain ASCII (byte slicing otherwise cuts through
/// multi-byte characters), at least one token long, and a whole multiple of
/// the reading frame.
pub(crate) fn check_string(s: &str, reading_frame: usize) -> Result<(), MatchError> {
    if !s.is_ascii() {
        return Err(MatchError::NotTokenizable {
            string: s.to_string(),
        });
    }
    if s.len() < reading_frame || s.len() % reading_frame != 0 {
        return Err(MatchError::IncompatibleLength {
            string: s.to_string(),
            reading_frame,
        });
    }
    Ok(())
}

/// Splits `s` into consecutive non-overlapping tokens of `reading_frame`
/// bytes, in order.
pub fn tokenize(s: &str, reading_frame: usize) -> Result<Vec<&str>, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s, reading_frame)?;
    Ok((0..s.len())
        .step_by(reading_frame)
        .map(|start| &s[start..start + reading_frame])
        .collect())
}

/// Number of tokens `s` holds under `reading_frame`.
pub fn token_count(s: &str, reading_frame: usize) -> Result<usize, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s, reading_frame)?;
    Ok(s.len() / reading_frame)
}
