//! Labeled string data sets loaded from YAML.
//!
//! A data set carries the strings under comparison (in file order), the
//! reading frame they are coded in, named comparisons (pairs of label
//! groups), and optional presentation and duration metadata. Validation is
//! eager: every string must tokenize under the reading frame and every
//! comparison may only reference known labels.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::duration::TokenDurations;
use crate::error::MatchError;
use crate::tokens::{check_positive, check_string};

/// Errors raised while building or querying a string data set.
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("no strings defined")]
    NoStrings,
    #[error("string entry {0} is neither a string nor a label mapping")]
    InvalidEntry(String),
    #[error("duplicate string label {0:?}")]
    DuplicateLabel(String),
    #[error("comparison {comparison:?} needs a strings_a and a strings_b group")]
    InvalidComparison { comparison: String },
    #[error("unknown string label {label:?} in comparison {comparison:?}")]
    UnknownLabel { label: String, comparison: String },
    #[error("unknown comparison {0:?}")]
    UnknownComparison(String),
    #[error(transparent)]
    Invalid(#[from] MatchError),
}

/// A named pair of label groups: every string of `strings_a` is compared
/// against every string of `strings_b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub strings_a: Vec<String>,
    pub strings_b: Vec<String>,
}

/// A labeled collection of token strings plus comparison metadata.
#[derive(Debug, Clone)]
pub struct StringData {
    labels: Vec<String>,
    strings: HashMap<String, String>,
    reading_frame: usize,
    comparisons: HashMap<String, Comparison>,
    label_colors: HashMap<String, String>,
    token_durations: Option<TokenDurations>,
    isi_duration: Option<f64>,
}

impl StringData {
    /// Builds a data set from `(label, string)` pairs in presentation order.
    ///
    /// A `full` comparison over all labels is always defined.
    pub fn new(entries: Vec<(String, String)>, reading_frame: usize) -> Result<Self, DataError> {
        check_positive("readingframe", reading_frame).map_err(DataError::Invalid)?;
        if entries.is_empty() {
            return Err(DataError::NoStrings);
        }

        let mut labels = Vec::with_capacity(entries.len());
        let mut strings = HashMap::with_capacity(entries.len());
        for (label, string) in entries {
            check_string(&string, reading_frame).map_err(DataError::Invalid)?;
            if strings.insert(label.clone(), string).is_some() {
                return Err(DataError::DuplicateLabel(label));
            }
            labels.push(label);
        }

        let full = Comparison {
            strings_a: labels.clone(),
            strings_b: labels.clone(),
        };
        let mut comparisons = HashMap::new();
        comparisons.insert("full".to_string(), full);

        Ok(Self {
            labels,
            strings,
            reading_frame,
            comparisons,
            label_colors: HashMap::new(),
            token_durations: None,
            isi_duration: None,
        })
    }

    /// Adds named comparisons; an explicit `full` entry replaces the default.
    pub fn with_comparisons(
        mut self,
        comparisons: HashMap<String, Comparison>,
    ) -> Result<Self, DataError> {
        for (name, comparison) in &comparisons {
            for label in comparison
                .strings_a
                .iter()
                .chain(comparison.strings_b.iter())
            {
                if !self.strings.contains_key(label) {
                    return Err(DataError::UnknownLabel {
                        label: label.clone(),
                        comparison: name.clone(),
                    });
                }
            }
        }
        self.comparisons.extend(comparisons);
        Ok(self)
    }

    /// Attaches per-label display colors.
    pub fn with_label_colors(mut self, label_colors: HashMap<String, String>) -> Self {
        self.label_colors = label_colors;
        self
    }

    /// Attaches the token duration table and inter-stimulus interval.
    pub fn with_durations(mut self, durations: TokenDurations, isi_duration: f64) -> Self {
        self.token_durations = Some(durations);
        self.isi_duration = Some(isi_duration);
        self
    }

    /// String labels in presentation order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The string filed under `label`.
    pub fn string(&self, label: &str) -> Option<&str> {
        self.strings.get(label).map(String::as_str)
    }

    pub fn reading_frame(&self) -> usize {
        self.reading_frame
    }

    /// Looks up a named comparison.
    pub fn comparison(&self, name: &str) -> Result<&Comparison, DataError> {
        self.comparisons
            .get(name)
            .ok_or_else(|| DataError::UnknownComparison(name.to_string()))
    }

    /// Display color attached to `label`, if any.
    pub fn label_color(&self, label: &str) -> Option<&str> {
        self.label_colors.get(label).map(String::as_str)
    }

    pub fn token_durations(&self) -> Option<&TokenDurations> {
        self.token_durations.as_ref()
    }

    pub fn isi_duration(&self) -> Option<f64> {
        self.isi_duration
    }

    /// Formats the labeled strings of a comparison, one aligned line per
    /// string, with a blank line between the two groups.
    pub fn format_strings(&self, comparison: &str) -> Result<String, DataError> {
        let comparison = self.comparison(comparison)?;
        let groups = [&comparison.strings_a, &comparison.strings_b];
        let fill = groups
            .iter()
            .flat_map(|group| group.iter())
            .map(|label| label.len())
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = String::new();
        for group in groups {
            for label in group {
                let string = self.string(label).unwrap_or("");
                lines.push_str(&format!("{label:<fill$}: {string}\n"));
            }
            lines.push('\n');
        }
        Ok(lines)
    }
}

#[derive(Debug, Deserialize)]
struct RawStringData {
    strings: Vec<serde_yaml::Value>,
    readingframe: Option<usize>,
    #[serde(default)]
    comparisons: HashMap<String, Vec<HashMap<String, Vec<String>>>>,
    #[serde(default)]
    labelcolors: HashMap<String, String>,
    tokendurations: Option<TokenDurations>,
    isiduration: Option<f64>,
}

fn labeled_entries(values: Vec<serde_yaml::Value>) -> Result<Vec<(String, String)>, DataError> {
    let mut entries = Vec::new();
    for value in values {
        match value {
            // A bare string labels itself.
            serde_yaml::Value::String(s) => entries.push((s.clone(), s)),
            serde_yaml::Value::Mapping(mapping) => {
                for (key, value) in mapping {
                    match (key, value) {
                        (serde_yaml::Value::String(label), serde_yaml::Value::String(string)) => {
                            entries.push((label, string));
                        }
                        (key, _) => return Err(DataError::InvalidEntry(format!("{key:?}"))),
                    }
                }
            }
            other => return Err(DataError::InvalidEntry(format!("{other:?}"))),
        }
    }
    Ok(entries)
}

fn named_comparisons(
    raw: HashMap<String, Vec<HashMap<String, Vec<String>>>>,
) -> Result<HashMap<String, Comparison>, DataError> {
    let mut comparisons = HashMap::with_capacity(raw.len());
    for (name, groups) in raw {
        let mut strings_a = None;
        let mut strings_b = None;
        for group in groups {
            for (key, labels) in group {
                match key.as_str() {
                    "strings_a" => strings_a = Some(labels),
                    "strings_b" => strings_b = Some(labels),
                    _ => {
                        return Err(DataError::InvalidComparison { comparison: name });
                    }
                }
            }
        }
        match (strings_a, strings_b) {
            (Some(strings_a), Some(strings_b)) => {
                comparisons.insert(
                    name,
                    Comparison {
                        strings_a,
                        strings_b,
                    },
                );
            }
            _ => return Err(DataError::InvalidComparison { comparison: name }),
        }
    }
    Ok(comparisons)
}

/// Parses a string data set from YAML text.
pub fn parse_stringdata(yaml: &str) -> Result<StringData, DataError> {
    let raw: RawStringData = serde_yaml::from_str(yaml)?;
    let entries = labeled_entries(raw.strings)?;

    let mut data = StringData::new(entries, raw.readingframe.unwrap_or(1))?
        .with_comparisons(named_comparisons(raw.comparisons)?)?
        .with_label_colors(raw.labelcolors);
    if let (Some(durations), Some(isi)) = (raw.tokendurations, raw.isiduration) {
        data = data.with_durations(durations, isi);
    }
    Ok(data)
}

/// Reads a string data set from a YAML file.
pub fn read_stringdata<P: AsRef<Path>>(path: P) -> Result<StringData, DataError> {
    let text = fs::read_to_string(path)?;
    parse_stringdata(&text)
}
