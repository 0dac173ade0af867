//! Per-keyword observation series for one sector fetch

use std::collections::HashMap;

/// Observation series table returned by one sector fetch.
///
/// One numeric column per keyword, sampled over the query window. Values
/// follow the source convention of 0-100 relative interest. Keywords the
/// source returned no column for are simply absent. The table lives for one
/// run only; nothing is retained across runs.
#[derive(Debug, Clone, Default)]
pub struct InterestTable {
    columns: HashMap<String, Vec<f64>>,
}

impl InterestTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a keyword's series. Empty series are dropped, matching the
    /// "no column means no data" contract.
    pub fn insert(&mut self, keyword: impl Into<String>, series: Vec<f64>) {
        if !series.is_empty() {
            self.columns.insert(keyword.into(), series);
        }
    }

    /// The observation series for a keyword, if the source returned one
    #[must_use]
    pub fn series(&self, keyword: &str) -> Option<&[f64]> {
        self.columns.get(keyword).map(Vec::as_slice)
    }

    /// Number of keywords with data
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no keyword has data
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
