//! Report generation pipeline
//!
//! Drives one full run: for each sector of the catalog, in order, fetch the
//! keyword series, compute per-keyword metrics and the sector summary, then
//! aggregate everything into the global sentiment.
//!
//! Sectors are processed strictly sequentially because the source enforces
//! request-rate limits; an injectable [`PausePolicy`] spaces consecutive
//! sector fetches. A sector whose fetch fails is logged and skipped; a
//! sector with no usable keyword data is reported as 0 / Stable but does
//! not enter the global mean. Only a run where no sector at all produced a
//! result is fatal.

use std::sync::Arc;
use std::time::Duration;

use crate::analysis::{self, KeywordMetric, SectorSummary};
use crate::catalog::SectorCatalog;
use crate::error::PipelineError;
use crate::report::Report;
use crate::trends::SeriesFetcher;

/// Spacing policy between successive sector fetches.
///
/// Modeled as a function of the request index so tests can run with zero
/// delay and deployments can tune the spacing to the source's limits.
pub trait PausePolicy: Send + Sync {
    /// Delay to apply before fetch number `request_index` (0-based).
    /// The first fetch is never delayed.
    fn pause_before(&self, request_index: usize) -> Duration;
}

/// Fixed inter-request delay, the production policy
#[derive(Debug, Clone)]
pub struct FixedPause(pub Duration);

impl PausePolicy for FixedPause {
    fn pause_before(&self, request_index: usize) -> Duration {
        if request_index == 0 {
            Duration::ZERO
        } else {
            self.0
        }
    }
}

/// No delay at all, for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct NoPause;

impl PausePolicy for NoPause {
    fn pause_before(&self, _request_index: usize) -> Duration {
        Duration::ZERO
    }
}

/// One-run report pipeline over an injected series fetcher
pub struct ReportPipeline {
    fetcher: Arc<dyn SeriesFetcher>,
    catalog: SectorCatalog,
    window: String,
    region: String,
    pause: Arc<dyn PausePolicy>,
}

impl ReportPipeline {
    /// Create a pipeline over a fetcher and catalog
    pub fn new(
        fetcher: Arc<dyn SeriesFetcher>,
        catalog: SectorCatalog,
        window: impl Into<String>,
        region: impl Into<String>,
        pause: Arc<dyn PausePolicy>,
    ) -> Self {
        Self {
            fetcher,
            catalog,
            window: window.into(),
            region: region.into(),
            pause,
        }
    }

    /// Run the full pipeline once and assemble the report.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoData`] when no sector produced a single
    /// keyword result, whether because every fetch failed, every series was
    /// empty, or the catalog was. Individual sector failures are swallowed
    /// at the sector boundary and logged.
    pub async fn run(&self) -> Result<Report, PipelineError> {
        let mut rows: Vec<KeywordMetric> = Vec::new();
        let mut sectors: Vec<SectorSummary> = Vec::new();
        // Only sectors backed by at least one keyword result feed the
        // global mean; degenerate 0 / Stable summaries stay report-only.
        let mut scored: Vec<SectorSummary> = Vec::new();

        for (index, entry) in self.catalog.sectors().enumerate() {
            let pause = self.pause.pause_before(index);
            if !pause.is_zero() {
                tracing::debug!(sector = %entry.name, pause_ms = %pause.as_millis(), "Pausing before fetch");
                tokio::time::sleep(pause).await;
            }

            let table = match self
                .fetcher
                .fetch(&entry.keywords, &self.window, &self.region)
                .await
            {
                Ok(table) => table,
                Err(e) => {
                    // Transient source failure: the sector contributes
                    // nothing and the run continues.
                    tracing::warn!(sector = %entry.name, error = %e, "Sector fetch failed, skipping");
                    continue;
                }
            };

            let metrics: Vec<KeywordMetric> = entry
                .keywords
                .iter()
                .filter_map(|keyword| {
                    table
                        .series(keyword)
                        .and_then(|series| analysis::metrics::compute(&entry.name, keyword, series))
                })
                .collect();

            let summary = analysis::sector_summary(&entry.name, &metrics);
            tracing::debug!(
                sector = %entry.name,
                keywords_with_data = %metrics.len(),
                score = %summary.sentiment_score,
                "Sector aggregated"
            );

            if !metrics.is_empty() {
                scored.push(summary.clone());
            }
            rows.extend(metrics);
            sectors.push(summary);
        }

        let global = analysis::global_summary(&scored)?;
        tracing::info!(
            sectors = %sectors.len(),
            scored = %scored.len(),
            global_score = %global.sentiment_score,
            "Report assembled"
        );

        Ok(Report::new(
            chrono::Local::now().date_naive(),
            rows,
            sectors,
            global,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_pause_skips_first_fetch() {
        let policy = FixedPause(Duration::from_secs(2));
        assert_eq!(policy.pause_before(0), Duration::ZERO);
        assert_eq!(policy.pause_before(1), Duration::from_secs(2));
        assert_eq!(policy.pause_before(4), Duration::from_secs(2));
    }

    #[test]
    fn test_no_pause() {
        assert_eq!(NoPause.pause_before(0), Duration::ZERO);
        assert_eq!(NoPause.pause_before(3), Duration::ZERO);
    }
}
