//! Pairwise comparison of symbolic token strings.
//!
//! This crate analyzes sets of token-coded strings (e.g. artificial-grammar
//! sound sequences) for shared, novel and aligned substrings: exact window
//! matching under a configurable reading frame, longest-common and novel
//! substring search, prefix matching, acoustic-duration scoring, sliding
//! cross-correlation, and token-level edit distance. A YAML-backed data-set
//! layer and a pairwise orchestrator turn the core functions into labeled
//! comparison matrices.

pub mod compare;
pub mod correlate;
pub mod distance;
pub mod duration;
pub mod error;
pub mod htmltables;
pub mod matching;
pub mod stringdata;
pub mod tokens;

pub use correlate::{cross_correlate, CrossCorrelation};
pub use distance::levenshtein;
pub use duration::{common_start_duration, longest_shared_substring_duration, TokenDurations};
pub use error::MatchError;
pub use matching::{
    common_start, common_start_length, is_substring, length_n_substrings,
    longest_shared_substrings, novel_length_n_substrings, same_start, shared_length_n_substrings,
    shared_substrings, NovelSubstring, SharedSubstring,
};
pub use stringdata::{parse_stringdata, read_stringdata, Comparison, DataError, StringData};
pub use tokens::{token_count, tokenize};
