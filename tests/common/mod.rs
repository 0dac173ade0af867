//! Common test utilities

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use veille::error::FetchError;
use veille::trends::{InterestTable, SeriesFetcher};

/// Scripted fetcher: responses are keyed by the first keyword of the
/// requested set, which is unique per sector in these tests.
#[derive(Default)]
pub struct StubFetcher {
    series: HashMap<String, Vec<(String, Vec<f64>)>>,
    failing: HashSet<String>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful fetch for the sector whose keyword set starts
    /// with `first_keyword`
    pub fn with_series(
        mut self,
        first_keyword: &str,
        columns: Vec<(&str, Vec<f64>)>,
    ) -> Self {
        self.series.insert(
            first_keyword.to_string(),
            columns
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        );
        self
    }

    /// Script a transient failure for the sector whose keyword set starts
    /// with `first_keyword`
    pub fn with_failure(mut self, first_keyword: &str) -> Self {
        self.failing.insert(first_keyword.to_string());
        self
    }
}

#[async_trait]
impl SeriesFetcher for StubFetcher {
    async fn fetch(
        &self,
        keywords: &[String],
        _window: &str,
        _region: &str,
    ) -> Result<InterestTable, FetchError> {
        let key = keywords.first().map(String::as_str).unwrap_or_default();

        if self.failing.contains(key) {
            return Err(FetchError::RateLimited);
        }

        let mut table = InterestTable::new();
        if let Some(columns) = self.series.get(key) {
            for (keyword, series) in columns {
                table.insert(keyword.clone(), series.clone());
            }
        }
        Ok(table)
    }
}
