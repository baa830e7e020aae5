//! Exact substring matching between pairs of token strings.
//!
//! All scans are brute-force double loops over token windows. Input strings
//! are short utterance-like sequences, so positional fidelity matters more
//! than asymptotic performance; the emission order (by position in `s1`, then
//! by position in `s2`) is part of the contract.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::MatchError;
use crate::tokens::{check_positive, check_string};

/// A substring occurring in both compared strings, with every pair of token
/// positions `(pos1, pos2)` at which it matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedSubstring {
    pub substring: String,
    pub positions: Vec<(usize, usize)>,
}

/// A substring of the first string that occurs nowhere in the second, with
/// its token position in the first string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NovelSubstring {
    pub substring: String,
    pub position: usize,
}

/// All consecutive windows of `n` tokens from `s`, left to right.
///
/// Yields `token_count(s) - n + 1` windows; when `n` exceeds the token count
/// the result is empty rather than an error, so length-descending searches
/// can recurse through it.
pub fn length_n_substrings<'a>(
    s: &'a str,
    n: usize,
    reading_frame: usize,
) -> Result<Vec<&'a str>, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s, reading_frame)?;
    check_positive("n", n)?;

    let count = (s.len() / reading_frame).saturating_sub(n - 1);
    let window_len = n * reading_frame;
    Ok((0..count)
        .map(|pos| {
            let start = pos * reading_frame;
            &s[start..start + window_len]
        })
        .collect())
}

/// Finds the length-`n` substrings of `s1` that also occur in `s2`.
///
/// Every length-`n` window of `s1` is scanned against every length-`n`
/// window of `s2`; windows with at least one match are emitted in `s1`
/// position order, carrying all their `s2` match positions left to right.
/// Positions are token indices, not byte offsets.
pub fn shared_length_n_substrings(
    s1: &str,
    s2: &str,
    n: usize,
    reading_frame: usize,
) -> Result<Vec<SharedSubstring>, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s1, reading_frame)?;
    check_string(s2, reading_frame)?;
    check_positive("n", n)?;

    let window_len = n * reading_frame;
    let count1 = (s1.len() / reading_frame).saturating_sub(n - 1);
    let count2 = (s2.len() / reading_frame).saturating_sub(n - 1);

    let mut hits = Vec::new();
    for pos1 in 0..count1 {
        let start = pos1 * reading_frame;
        let window = &s1[start..start + window_len];
        let positions: Vec<(usize, usize)> = (0..count2)
            .filter(|pos2| {
                let start2 = pos2 * reading_frame;
                &s2[start2..start2 + window_len] == window
            })
            .map(|pos2| (pos1, pos2))
            .collect();
        if !positions.is_empty() {
            hits.push(SharedSubstring {
                substring: window.to_string(),
                positions,
            });
        }
    }
    Ok(hits)
}

/// Finds shared substrings of every length, ordered by increasing length.
///
/// One entry per length `n` from 1 to `token_count(s1)`; lengths with no
/// matches are skipped.
pub fn shared_substrings(
    s1: &str,
    s2: &str,
    reading_frame: usize,
) -> Result<Vec<Vec<SharedSubstring>>, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s1, reading_frame)?;
    check_string(s2, reading_frame)?;

    let token_count = s1.len() / reading_frame;
    let mut all = Vec::new();
    for n in 1..=token_count {
        let matches = shared_length_n_substrings(s1, s2, n, reading_frame)?;
        if !matches.is_empty() {
            all.push(matches);
        }
    }
    Ok(all)
}

/// Finds the longest substrings of `s1` that also occur in `s2`.
///
/// Searches lengths from `token_count(s1)` downward and returns every match
/// at the first length that yields any; empty when the strings share nothing,
/// even at length 1.
pub fn longest_shared_substrings(
    s1: &str,
    s2: &str,
    reading_frame: usize,
) -> Result<Vec<SharedSubstring>, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s1, reading_frame)?;
    check_string(s2, reading_frame)?;

    for n in (1..=s1.len() / reading_frame).rev() {
        let matches = shared_length_n_substrings(s1, s2, n, reading_frame)?;
        if !matches.is_empty() {
            return Ok(matches);
        }
    }
    Ok(Vec::new())
}

/// Finds the length-`n` windows of `s1` whose value occurs nowhere among the
/// length-`n` windows of `s2`.
///
/// Membership is by value, not position; every qualifying `s1` position is
/// emitted, including repeats of the same window value.
pub fn novel_length_n_substrings(
    s1: &str,
    s2: &str,
    n: usize,
    reading_frame: usize,
) -> Result<Vec<NovelSubstring>, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s1, reading_frame)?;
    check_string(s2, reading_frame)?;
    check_positive("n", n)?;

    let known: HashSet<&str> = length_n_substrings(s2, n, reading_frame)?
        .into_iter()
        .collect();
    Ok(length_n_substrings(s1, n, reading_frame)?
        .into_iter()
        .enumerate()
        .filter(|(_, window)| !known.contains(window))
        .map(|(position, window)| NovelSubstring {
            substring: window.to_string(),
            position,
        })
        .collect())
}

/// Returns the token-aligned prefix that `s1` and `s2` share.
///
/// Counts how many of the prefix tests at lengths 1, 2, ... `token_count(s1)`
/// tokens succeed, then slices that many tokens from `s1`. Prefix matching is
/// monotonic, so the count equals the shared prefix length; the counting form
/// is kept as-is.
pub fn common_start<'a>(
    s1: &'a str,
    s2: &str,
    reading_frame: usize,
) -> Result<&'a str, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s1, reading_frame)?;
    check_string(s2, reading_frame)?;

    let count = (1..=s1.len() / reading_frame)
        .filter(|&tokens| s2.starts_with(&s1[..tokens * reading_frame]))
        .count();
    Ok(&s1[..count * reading_frame])
}

/// Token length of the prefix that `s1` and `s2` share.
pub fn common_start_length(s1: &str, s2: &str, reading_frame: usize) -> Result<usize, MatchError> {
    Ok(common_start(s1, s2, reading_frame)?.len() / reading_frame)
}

/// True when `s2` occurs anywhere inside `s1`.
///
/// Plain containment; the occurrence need not sit on a token boundary.
pub fn is_substring(s1: &str, s2: &str, reading_frame: usize) -> Result<bool, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s1, reading_frame)?;
    check_string(s2, reading_frame)?;
    Ok(s1.contains(s2))
}

/// True when `s1` and `s2` begin with the same `n` tokens.
///
/// Prefixes saturate: asking for more tokens than a string holds compares the
/// whole string.
pub fn same_start(s1: &str, s2: &str, n: usize, reading_frame: usize) -> Result<bool, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s1, reading_frame)?;
    check_string(s2, reading_frame)?;
    check_positive("n", n)?;

    let span = n * reading_frame;
    Ok(s1[..span.min(s1.len())] == s2[..span.min(s2.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(s1: &str, s2: &str, n: usize) -> Vec<SharedSubstring> {
        shared_length_n_substrings(s1, s2, n, 1).unwrap()
    }

    fn hit(substring: &str, positions: &[(usize, usize)]) -> SharedSubstring {
        SharedSubstring {
            substring: substring.to_string(),
            positions: positions.to_vec(),
        }
    }

    #[test]
    fn windows_cover_string_in_order() {
        let windows = length_n_substrings("abcde", 2, 1).unwrap();
        assert_eq!(windows, vec!["ab", "bc", "cd", "de"]);
    }

    #[test]
    fn oversized_window_request_yields_empty() {
        let windows = length_n_substrings("ab", 3, 1).unwrap();
        assert!(windows.is_empty());
    }

    #[test]
    fn zero_window_length_is_an_error() {
        assert_eq!(
            length_n_substrings("ab", 0, 1),
            Err(MatchError::InvalidParameter { name: "n", value: 0 })
        );
    }

    #[test]
    fn finds_single_shared_window() {
        assert_eq!(shared("bc", "abcde", 2), vec![hit("bc", &[(0, 1)])]);
        assert_eq!(shared("ab", "abcde", 2), vec![hit("ab", &[(0, 0)])]);
        assert_eq!(shared("de", "abcde", 2), vec![hit("de", &[(0, 3)])]);
    }

    #[test]
    fn reports_position_within_first_string() {
        assert_eq!(shared("fbcg", "abcde", 2), vec![hit("bc", &[(1, 1)])]);
        assert_eq!(shared("fdeg", "abcde", 2), vec![hit("de", &[(1, 3)])]);
        assert_eq!(shared("fgde", "de", 2), vec![hit("de", &[(2, 0)])]);
    }

    #[test]
    fn collects_every_occurrence_in_second_string() {
        assert_eq!(
            shared("fdeg", "abcdedef", 2),
            vec![hit("de", &[(1, 3), (1, 5)])]
        );
        assert_eq!(shared("fdeg", "dede", 2), vec![hit("de", &[(1, 0), (1, 2)])]);
    }

    #[test]
    fn positions_are_token_indices_under_wide_frames() {
        let hits = shared_length_n_substrings("cdefgi", "abcdefgh", 2, 2).unwrap();
        assert_eq!(hits, vec![hit("cdef", &[(0, 1)])]);
    }

    #[test]
    fn gathers_shared_substrings_of_every_length() {
        let all = shared_substrings("bc", "abcde", 1).unwrap();
        assert_eq!(
            all,
            vec![
                vec![hit("b", &[(0, 1)]), hit("c", &[(1, 2)])],
                vec![hit("bc", &[(0, 1)])],
            ]
        );
    }

    #[test]
    fn longest_search_returns_all_maximal_matches() {
        let hits = longest_shared_substrings("bcdabc", "abcde", 1).unwrap();
        assert_eq!(hits, vec![hit("bcd", &[(0, 1)]), hit("abc", &[(3, 0)])]);
    }

    #[test]
    fn longest_search_is_empty_when_nothing_is_shared() {
        let hits = longest_shared_substrings("ab", "cd", 1).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn novel_windows_complement_the_shared_set() {
        let novel = novel_length_n_substrings("abc", "abd", 1, 1).unwrap();
        assert_eq!(
            novel,
            vec![NovelSubstring {
                substring: "c".to_string(),
                position: 2
            }]
        );

        let novel = novel_length_n_substrings("abc", "abd", 2, 1).unwrap();
        assert_eq!(
            novel,
            vec![NovelSubstring {
                substring: "bc".to_string(),
                position: 1
            }]
        );
    }

    #[test]
    fn novel_windows_report_every_position() {
        let novel = novel_length_n_substrings("abc", "ade", 1, 1).unwrap();
        assert_eq!(
            novel,
            vec![
                NovelSubstring {
                    substring: "b".to_string(),
                    position: 1
                },
                NovelSubstring {
                    substring: "c".to_string(),
                    position: 2
                },
            ]
        );
    }

    #[test]
    fn novel_windows_respect_the_reading_frame() {
        let novel = novel_length_n_substrings("abcdefghij", "azcdefghij", 2, 2).unwrap();
        assert_eq!(
            novel,
            vec![NovelSubstring {
                substring: "abcd".to_string(),
                position: 0
            }]
        );

        let novel = novel_length_n_substrings("abcdefghij", "abcdfeghij", 2, 2).unwrap();
        assert_eq!(
            novel,
            vec![
                NovelSubstring {
                    substring: "cdef".to_string(),
                    position: 1
                },
                NovelSubstring {
                    substring: "efgh".to_string(),
                    position: 2
                },
            ]
        );
    }

    #[test]
    fn common_start_stops_at_first_divergence() {
        assert_eq!(common_start("abcd", "abef", 1).unwrap(), "ab");
        assert_eq!(common_start_length("abcd", "abef", 1).unwrap(), 2);
    }

    #[test]
    fn common_start_handles_disjoint_strings() {
        assert_eq!(common_start("ab", "cd", 1).unwrap(), "");
        assert_eq!(common_start_length("ab", "cd", 1).unwrap(), 0);
    }

    #[test]
    fn common_start_is_token_aligned() {
        // Three shared leading characters, but only one whole two-byte token.
        assert_eq!(common_start("abcdef", "abcgef", 2).unwrap(), "ab");
        assert_eq!(common_start_length("abcdef", "abcgef", 2).unwrap(), 1);
    }

    #[test]
    fn common_start_never_exceeds_the_shorter_string() {
        assert_eq!(common_start("abcd", "ab", 1).unwrap(), "ab");
    }

    #[test]
    fn substring_containment_is_plain() {
        assert!(is_substring("abcde", "bcd", 1).unwrap());
        assert!(!is_substring("abcde", "ce", 1).unwrap());
    }

    #[test]
    fn same_start_compares_saturating_prefixes() {
        assert!(same_start("abc", "abd", 2, 1).unwrap());
        assert!(!same_start("abc", "abd", 3, 1).unwrap());
        // Past the end of both strings, whole strings are compared.
        assert!(!same_start("ab", "abc", 5, 1).unwrap());
        assert!(same_start("ab", "ab", 5, 1).unwrap());
    }
}
