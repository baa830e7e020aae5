//! Sliding cross-correlation of two token sequences.

use serde::Serialize;

use crate::error::MatchError;
use crate::tokens::{check_positive, check_string, tokenize};

/// Alignment score curve and per-offset match masks.
///
/// `scores[i]` counts the positions of `s1` matching the aligned token of
/// `s2` at offset `i`; `masks[i]` carries the matching `s1` token at each
/// position and `None` where the alignment disagrees. Offsets ascend from
/// minimal overlap on the left to minimal overlap on the right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossCorrelation {
    pub scores: Vec<usize>,
    pub masks: Vec<Vec<Option<String>>>,
}

impl CrossCorrelation {
    /// Highest alignment score over all offsets; zero for an empty curve.
    pub fn max_score(&self) -> usize {
        self.scores.iter().copied().max().unwrap_or(0)
    }
}

/// Slides `s1` across `s2` and scores every alignment.
///
/// `s2` is padded on both sides with empty sentinel slots so that every
/// offset with at least one token of overlap is scored, from minimal to
/// maximal overlap. With `full` set the whole curve is returned; otherwise
/// the `token_count(s1) - 1` lowest and highest offsets are trimmed, leaving
/// only the central full-overlap window (which is empty when `s2` is shorter
/// than `s1`).
pub fn cross_correlate(
    s1: &str,
    s2: &str,
    reading_frame: usize,
    full: bool,
) -> Result<CrossCorrelation, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s1, reading_frame)?;
    check_string(s2, reading_frame)?;

    let probe = tokenize(s1, reading_frame)?;
    let target = tokenize(s2, reading_frame)?;

    // Padded target: probe can hang off either end by all but one token.
    let pad = probe.len() - 1;
    let mut padded: Vec<Option<&str>> = vec![None; pad];
    padded.extend(target.iter().copied().map(Some));
    padded.extend(std::iter::repeat(None).take(pad));

    let offsets = padded.len() - probe.len() + 1;
    let mut scores = Vec::with_capacity(offsets);
    let mut masks = Vec::with_capacity(offsets);
    for offset in 0..offsets {
        let mask: Vec<Option<String>> = probe
            .iter()
            .enumerate()
            .map(|(i, token)| {
                if padded[offset + i] == Some(*token) {
                    Some(token.to_string())
                } else {
                    None
                }
            })
            .collect();
        scores.push(mask.iter().filter(|slot| slot.is_some()).count());
        masks.push(mask);
    }

    if !full {
        let keep = scores.len().saturating_sub(2 * pad);
        scores = scores.into_iter().skip(pad).take(keep).collect();
        masks = masks.into_iter().skip(pad).take(keep).collect();
    }

    Ok(CrossCorrelation { scores, masks })
}
