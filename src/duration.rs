//! Acoustic duration of matched substrings.
//!
//! Matches are scored by the summed duration of their tokens plus a fixed
//! inter-stimulus interval between consecutive tokens, so a short match of
//! long sounds can outweigh a longer match of short ones.

use std::collections::HashMap;

use crate::error::MatchError;
use crate::matching::{common_start, longest_shared_substrings};
use crate::tokens::tokenize;

/// Duration table: one entry per token value, in seconds.
pub type TokenDurations = HashMap<String, f64>;

fn token_run_duration(
    tokens: &[&str],
    durations: &TokenDurations,
    isi_duration: f64,
) -> Result<f64, MatchError> {
    let mut total = 0.0;
    for token in tokens {
        total += durations
            .get(*token)
            .copied()
            .ok_or_else(|| MatchError::MissingDuration {
                token: token.to_string(),
            })?;
    }
    if tokens.is_empty() {
        Ok(0.0)
    } else {
        Ok(total + (tokens.len() - 1) as f64 * isi_duration)
    }
}

/// Duration of the prefix that `s1` and `s2` share.
///
/// Sums the duration of every prefix token plus one inter-stimulus interval
/// per token transition; `0.0` when the strings share no start.
pub fn common_start_duration(
    s1: &str,
    s2: &str,
    durations: &TokenDurations,
    isi_duration: f64,
    reading_frame: usize,
) -> Result<f64, MatchError> {
    let start = common_start(s1, s2, reading_frame)?;
    if start.is_empty() {
        return Ok(0.0);
    }
    let tokens = tokenize(start, reading_frame)?;
    token_run_duration(&tokens, durations, isi_duration)
}

/// Longest duration over all longest shared substrings of `s1` in `s2`.
///
/// Every maximal match is scored; the maximum is folded over a `0.0`
/// baseline, so no match at all yields zero.
pub fn longest_shared_substring_duration(
    s1: &str,
    s2: &str,
    durations: &TokenDurations,
    isi_duration: f64,
    reading_frame: usize,
) -> Result<f64, MatchError> {
    let mut best = 0.0f64;
    for hit in longest_shared_substrings(s1, s2, reading_frame)? {
        let tokens = tokenize(&hit.substring, reading_frame)?;
        best = best.max(token_run_duration(&tokens, durations, isi_duration)?);
    }
    Ok(best)
}
