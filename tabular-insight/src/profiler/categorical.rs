//! Frequency statistics for categorical columns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Value counts in first-seen order.
///
/// The order is part of the contract: [`FrequencyTable::mode`] breaks ties in
/// favour of the value that appeared first in the data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `value`.
    pub fn observe(&mut self, value: &str) {
        match self.index.get(value) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(value.to_string(), self.entries.len());
                self.entries.push((value.to_string(), 1));
            }
        }
    }

    /// Number of distinct values.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Total observations.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn count_of(&self, value: &str) -> usize {
        self.index.get(value).map_or(0, |&slot| self.entries[slot].1)
    }

    /// The most frequent value and its count.
    ///
    /// Walks entries in first-seen order and replaces the current best only
    /// on a strictly higher count.
    pub fn mode(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (value, count) in &self.entries {
            match best {
                Some((_, best_count)) if *count <= best_count => {}
                _ => best = Some((value.as_str(), *count)),
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(value, count)| (value.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for value in iter {
            table.observe(value);
        }
        table
    }
}

/// Summary row for one categorical column.
///
/// `mode` and `mode_frequency` are `None` exactly when `count` is zero: the
/// sentinel row for a column with no present values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub column: String,
    /// Number of non-empty values.
    pub count: usize,
    /// Number of distinct non-empty values.
    pub unique: usize,
    pub mode: Option<String>,
    pub mode_frequency: Option<usize>,
}

impl CategoricalSummary {
    /// The zero-count sentinel row.
    pub fn unavailable(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            count: 0,
            unique: 0,
            mode: None,
            mode_frequency: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.count > 0
    }
}

/// Summarizes one column. Only `Empty` cells are excluded; `"0"` counts.
pub fn summarize_categorical<'a, I>(column: &str, cells: I) -> CategoricalSummary
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let frequencies: FrequencyTable = cells.into_iter().filter_map(CellValue::as_str).collect();

    match frequencies.mode() {
        None => CategoricalSummary::unavailable(column),
        Some((mode, mode_frequency)) => CategoricalSummary {
            column: column.to_string(),
            count: frequencies.total(),
            unique: frequencies.distinct(),
            mode: Some(mode.to_string()),
            mode_frequency: Some(mode_frequency),
        },
    }
}
