//! Pairwise comparison of string sets.
//!
//! `analyze_pairwise` applies one pure analysis function to every pair of a
//! comparison's label groups and post-processes each result with a second
//! pure function, assembling a labeled result matrix. The core functions are
//! stateless, so rows are independent; with the `parallel` feature they are
//! computed on the rayon pool.

use std::fmt;

use serde::Serialize;

use crate::correlate::cross_correlate;
use crate::distance;
use crate::error::MatchError;
use crate::matching;
use crate::stringdata::{DataError, StringData};

/// Errors raised while assembling a comparison matrix.
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error("data set defines no token durations")]
    MissingDurations,
}

/// One result per (row label, column label) pair of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMatrix<T> {
    title: String,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    cells: Vec<Vec<T>>,
}

impl<T> ComparisonMatrix<T> {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Cells in row-major order, one inner vector per row label.
    pub fn cells(&self) -> &[Vec<T>] {
        &self.cells
    }

    /// The cell at a (row label, column label) address.
    pub fn get(&self, row: &str, col: &str) -> Option<&T> {
        let row = self.row_labels.iter().position(|label| label == row)?;
        let col = self.col_labels.iter().position(|label| label == col)?;
        self.cells.get(row)?.get(col)
    }
}

impl<T: Clone> ComparisonMatrix<T> {
    /// Swaps rows and columns.
    pub fn transposed(&self) -> Self {
        let cells = (0..self.col_labels.len())
            .map(|col| self.cells.iter().map(|row| row[col].clone()).collect())
            .collect();
        Self {
            title: self.title.clone(),
            row_labels: self.col_labels.clone(),
            col_labels: self.row_labels.clone(),
            cells,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ComparisonMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .cells
            .iter()
            .map(|row| row.iter().map(T::to_string).collect())
            .collect();
        let label_width = self
            .row_labels
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0);
        let col_widths: Vec<usize> = self
            .col_labels
            .iter()
            .enumerate()
            .map(|(col, label)| {
                cells
                    .iter()
                    .map(|row| row[col].len())
                    .max()
                    .unwrap_or(0)
                    .max(label.len())
            })
            .collect();

        writeln!(f, "{}", self.title)?;
        write!(f, "{:label_width$}", "")?;
        for (label, &width) in self.col_labels.iter().zip(&col_widths) {
            write!(f, "  {label:>width$}")?;
        }
        writeln!(f)?;
        for (label, row) in self.row_labels.iter().zip(&cells) {
            write!(f, "{label:<label_width$}")?;
            for (cell, &width) in row.iter().zip(&col_widths) {
                write!(f, "  {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Applies `analysis` to every pair of a comparison's groups and `access` to
/// every result.
///
/// Rows follow `strings_a`, columns follow `strings_b`; the analysis receives
/// `(row string, column string, reading frame)`. Any error aborts the whole
/// matrix.
pub fn analyze_pairwise<R, T, A, D>(
    data: &StringData,
    comparison: &str,
    title: &str,
    analysis: A,
    access: D,
) -> Result<ComparisonMatrix<T>, CompareError>
where
    A: Fn(&str, &str, usize) -> Result<R, MatchError> + Sync,
    D: Fn(R) -> T + Sync,
    T: Send,
{
    let pairing = data.comparison(comparison)?;
    let reading_frame = data.reading_frame();
    let row_labels = pairing.strings_a.clone();
    let col_labels = pairing.strings_b.clone();

    let lookup = |label: &String| -> Result<&str, CompareError> {
        data.string(label)
            .ok_or_else(|| {
                CompareError::Data(DataError::UnknownLabel {
                    label: label.clone(),
                    comparison: comparison.to_string(),
                })
            })
    };
    let compute_row = |row_label: &String| -> Result<Vec<T>, CompareError> {
        let s1 = lookup(row_label)?;
        col_labels
            .iter()
            .map(|col_label| {
                let s2 = lookup(col_label)?;
                Ok(access(analysis(s1, s2, reading_frame)?))
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let cells: Vec<Vec<T>> = {
        use rayon::prelude::*;
        row_labels
            .par_iter()
            .map(&compute_row)
            .collect::<Result<_, _>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let cells: Vec<Vec<T>> = row_labels
        .iter()
        .map(compute_row)
        .collect::<Result<_, _>>()?;

    log::debug!(
        "analyzed {} x {} pairs for {:?}",
        row_labels.len(),
        col_labels.len(),
        title
    );

    Ok(ComparisonMatrix {
        title: title.to_string(),
        row_labels,
        col_labels,
        cells,
    })
}

/// Token length of the longest shared substring per pair; 0 when nothing is
/// shared.
pub fn longest_shared_substring_length(
    data: &StringData,
    comparison: &str,
) -> Result<ComparisonMatrix<usize>, CompareError> {
    let reading_frame = data.reading_frame();
    analyze_pairwise(
        data,
        comparison,
        "Length longest shared substring",
        matching::longest_shared_substrings,
        move |hits| {
            hits.first()
                .map(|hit| hit.substring.len() / reading_frame)
                .unwrap_or(0)
        },
    )
}

/// Acoustic duration of the longest shared substring per pair.
pub fn longest_shared_substring_duration(
    data: &StringData,
    comparison: &str,
) -> Result<ComparisonMatrix<f64>, CompareError> {
    let durations = data.token_durations().ok_or(CompareError::MissingDurations)?;
    let isi = data.isi_duration().ok_or(CompareError::MissingDurations)?;
    analyze_pairwise(
        data,
        comparison,
        "Duration longest shared substring",
        |s1, s2, rf| crate::duration::longest_shared_substring_duration(s1, s2, durations, isi, rf),
        |duration| duration,
    )
}

/// Highest cross-correlation score per pair, over the full offset curve.
pub fn cross_correlation_max(
    data: &StringData,
    comparison: &str,
) -> Result<ComparisonMatrix<usize>, CompareError> {
    analyze_pairwise(
        data,
        comparison,
        "Maximum crosscorrelation",
        |s1, s2, rf| cross_correlate(s1, s2, rf, true),
        |cc| cc.max_score(),
    )
}

/// Total number of length-`n` shared substring occurrences per pair.
pub fn shared_length_n_substring_count(
    data: &StringData,
    n: usize,
    comparison: &str,
) -> Result<ComparisonMatrix<usize>, CompareError> {
    analyze_pairwise(
        data,
        comparison,
        &format!("Number of {n}-length shared substrings"),
        move |s1, s2, rf| matching::shared_length_n_substrings(s1, s2, n, rf),
        |hits| hits.iter().map(|hit| hit.positions.len()).sum(),
    )
}

/// Number of length-`n` windows of the column string absent from the row
/// string.
pub fn novel_length_n_substring_count(
    data: &StringData,
    n: usize,
    comparison: &str,
) -> Result<ComparisonMatrix<usize>, CompareError> {
    analyze_pairwise(
        data,
        comparison,
        &format!("Number of novel {n}-length substrings"),
        move |s1, s2, rf| matching::novel_length_n_substrings(s2, s1, n, rf),
        |novel| novel.len(),
    )
}

/// Token length of the shared start per pair.
pub fn common_start_length(
    data: &StringData,
    comparison: &str,
) -> Result<ComparisonMatrix<usize>, CompareError> {
    analyze_pairwise(
        data,
        comparison,
        "Length of shared start substring",
        matching::common_start_length,
        |length| length,
    )
}

/// Acoustic duration of the shared start per pair.
pub fn common_start_duration(
    data: &StringData,
    comparison: &str,
) -> Result<ComparisonMatrix<f64>, CompareError> {
    let durations = data.token_durations().ok_or(CompareError::MissingDurations)?;
    let isi = data.isi_duration().ok_or(CompareError::MissingDurations)?;
    analyze_pairwise(
        data,
        comparison,
        "Duration of shared start substring",
        |s1, s2, rf| crate::duration::common_start_duration(s1, s2, durations, isi, rf),
        |duration| duration,
    )
}

/// Whether the row and column strings are identical.
pub fn is_same(
    data: &StringData,
    comparison: &str,
) -> Result<ComparisonMatrix<bool>, CompareError> {
    analyze_pairwise(
        data,
        comparison,
        "Identical strings",
        |s1, s2, _rf| Ok::<_, MatchError>(s1 == s2),
        |same| same,
    )
}

/// Whether the column string occurs inside the row string.
pub fn is_substring(
    data: &StringData,
    comparison: &str,
) -> Result<ComparisonMatrix<bool>, CompareError> {
    analyze_pairwise(
        data,
        comparison,
        "Is substring",
        matching::is_substring,
        |contained| contained,
    )
}

/// Whether the row and column strings begin with the same `n` tokens.
pub fn same_start(
    data: &StringData,
    n: usize,
    comparison: &str,
) -> Result<ComparisonMatrix<bool>, CompareError> {
    analyze_pairwise(
        data,
        comparison,
        &format!("Has same {n}-length substring start"),
        move |s1, s2, rf| matching::same_start(s1, s2, n, rf),
        |same| same,
    )
}

/// Token-level Levenshtein distance per pair.
pub fn levenshtein(
    data: &StringData,
    comparison: &str,
) -> Result<ComparisonMatrix<usize>, CompareError> {
    analyze_pairwise(
        data,
        comparison,
        "Levenshtein distance",
        distance::levenshtein,
        |distance| distance,
    )
}
