//! Token-level edit distance.

use crate::error::MatchError;
use crate::tokens::{check_positive, check_string, tokenize};

/// Levenshtein distance between the token sequences of `s1` and `s2`.
///
/// Unit costs for insertion, deletion and substitution, computed over whole
/// tokens rather than characters when the reading frame exceeds 1. The
/// longer string drives the outer loop, rolling two rows of
/// `token_count(s2) + 1`; the distance is symmetric either way.
pub fn levenshtein(s1: &str, s2: &str, reading_frame: usize) -> Result<usize, MatchError> {
    check_positive("readingframe", reading_frame)?;
    check_string(s1, reading_frame)?;
    check_string(s2, reading_frame)?;

    let (s1, s2) = if s1.len() < s2.len() { (s2, s1) } else { (s1, s2) };
    let outer = tokenize(s1, reading_frame)?;
    let inner = tokenize(s2, reading_frame)?;

    let mut previous_row: Vec<usize> = (0..=inner.len()).collect();
    for (i, token1) in outer.iter().enumerate() {
        let mut current_row = Vec::with_capacity(inner.len() + 1);
        current_row.push(i + 1);
        for (j, token2) in inner.iter().enumerate() {
            let insertions = previous_row[j + 1] + 1;
            let deletions = current_row[j] + 1;
            let substitutions = previous_row[j] + usize::from(token1 != token2);
            current_row.push(insertions.min(deletions).min(substitutions));
        }
        previous_row = current_row;
    }
    Ok(previous_row[inner.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_distance() {
        assert_eq!(levenshtein("kitten", "sitting", 1).unwrap(), 3);
    }

    #[test]
    fn identical_strings_have_zero_distance() {
        assert_eq!(levenshtein("abcde", "abcde", 1).unwrap(), 0);
        assert_eq!(levenshtein("abcd", "abcd", 2).unwrap(), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(
            levenshtein("abc", "abcdef", 1).unwrap(),
            levenshtein("abcdef", "abc", 1).unwrap()
        );
        assert_eq!(levenshtein("abc", "abcdef", 1).unwrap(), 3);
    }

    #[test]
    fn counts_whole_token_substitutions() {
        // One token differs under a two-byte frame, although two characters do.
        assert_eq!(levenshtein("abcd", "abdc", 2).unwrap(), 1);
        assert_eq!(levenshtein("abcd", "abdc", 1).unwrap(), 2);
    }

    #[test]
    fn disjoint_strings_cost_a_full_rewrite() {
        assert_eq!(levenshtein("abc", "xyz", 1).unwrap(), 3);
    }
}
