//! Sector and global sentiment aggregation
//!
//! Two-level averaging: keyword variations are averaged into a sector
//! sentiment score, and sector scores are averaged into the global score.
//! This is deliberately not a flat average over all keywords, so a sector
//! with many keywords cannot outweigh the others.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

use super::{round1, KeywordMetric, FALLING_THRESHOLD, RISING_THRESHOLD};

/// Three-way sentiment label for a sector or the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    /// Score strictly above +10
    Positive,

    /// Score strictly below -10
    Negative,

    /// Everything in between, boundaries included
    Stable,
}

impl Sentiment {
    /// Classify a sentiment score, using the same thresholds as the
    /// per-keyword interpretation
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > RISING_THRESHOLD {
            Self::Positive
        } else if score < FALLING_THRESHOLD {
            Self::Negative
        } else {
            Self::Stable
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Stable => "Stable",
        }
    }
}

/// Sentiment summary for one sector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorSummary {
    /// Sector name
    pub sector: String,

    /// Mean of the sector's keyword variation percentages, rounded to
    /// 1 decimal. 0 when no keyword had data.
    pub sentiment_score: f64,

    /// Classification of the score
    pub label: Sentiment,
}

/// Sentiment summary for the whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSummary {
    /// Mean of all sector sentiment scores, rounded to 1 decimal
    pub sentiment_score: f64,

    /// Classification of the score
    pub label: Sentiment,
}

/// Aggregate one sector's keyword metrics into its sentiment summary.
///
/// An empty slice is the explicit degenerate case (every keyword was
/// skipped for lack of data): the sector scores 0 and reads Stable.
/// It is not a failure.
#[must_use]
pub fn sector_summary(sector: &str, metrics: &[KeywordMetric]) -> SectorSummary {
    let sentiment_score = if metrics.is_empty() {
        0.0
    } else {
        let sum: f64 = metrics.iter().map(|m| m.variation_pct).sum();
        round1(sum / metrics.len() as f64)
    };

    SectorSummary {
        sector: sector.to_string(),
        sentiment_score,
        label: Sentiment::from_score(sentiment_score),
    }
}

/// Aggregate sector summaries into the global sentiment.
///
/// Callers pass only sectors backed by at least one keyword result;
/// degenerate 0 / Stable summaries are excluded upstream so they cannot
/// drag the global mean toward zero.
///
/// # Errors
///
/// Returns [`PipelineError::NoData`] when no sector produced a result.
/// Defaulting to Stable here would mask a total pipeline failure, so the
/// absence of input is fatal for the run.
pub fn global_summary(sectors: &[SectorSummary]) -> Result<GlobalSummary, PipelineError> {
    if sectors.is_empty() {
        return Err(PipelineError::NoData);
    }

    let sum: f64 = sectors.iter().map(|s| s.sentiment_score).sum();
    let sentiment_score = round1(sum / sectors.len() as f64);

    Ok(GlobalSummary {
        sentiment_score,
        label: Sentiment::from_score(sentiment_score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metrics;

    fn metric(variation: f64) -> KeywordMetric {
        KeywordMetric {
            sector: "S".to_string(),
            keyword: "k".to_string(),
            average: 0.0,
            variation_pct: variation,
            interpretation: crate::analysis::Trend::from_variation(variation),
        }
    }

    #[test]
    fn test_degenerate_sector_scores_zero_stable() {
        let summary = sector_summary("Empty", &[]);
        assert_eq!(summary.sentiment_score, 0.0);
        assert_eq!(summary.label, Sentiment::Stable);
    }

    #[test]
    fn test_sector_mean_of_variations() {
        let summary = sector_summary("A", &[metric(0.0), metric(150.0)]);
        assert_eq!(summary.sentiment_score, 75.0);
        assert_eq!(summary.label, Sentiment::Positive);
    }

    #[test]
    fn test_sector_label_boundaries() {
        assert_eq!(sector_summary("S", &[metric(10.0)]).label, Sentiment::Stable);
        assert_eq!(sector_summary("S", &[metric(10.5)]).label, Sentiment::Positive);
        assert_eq!(sector_summary("S", &[metric(-10.0)]).label, Sentiment::Stable);
        assert_eq!(sector_summary("S", &[metric(-10.5)]).label, Sentiment::Negative);
    }

    #[test]
    fn test_global_is_mean_of_sector_scores() {
        let a = sector_summary("A", &[metric(30.0)]);
        let b = sector_summary("B", &[metric(-10.0)]);

        let global = global_summary(&[a, b]).unwrap();
        assert_eq!(global.sentiment_score, 10.0);
        assert_eq!(global.label, Sentiment::Stable);
    }

    #[test]
    fn test_two_level_mean_differs_from_flat_mean() {
        // Sector A: one keyword at 100%; sector B: three keywords at 0%.
        // Two-level: (100 + 0) / 2 = 50. Flat: 100 / 4 = 25.
        let a = sector_summary("A", &[metric(100.0)]);
        let b = sector_summary("B", &[metric(0.0), metric(0.0), metric(0.0)]);

        let global = global_summary(&[a, b]).unwrap();
        assert_eq!(global.sentiment_score, 50.0);

        let flat = (100.0 + 0.0 + 0.0 + 0.0) / 4.0;
        assert_ne!(global.sentiment_score, flat);
    }

    #[test]
    fn test_no_sectors_is_fatal() {
        let result = global_summary(&[]);
        assert!(matches!(result, Err(PipelineError::NoData)));
    }

    #[test]
    fn test_end_to_end_sector_scenario() {
        // Sector A from the reference scenario: k1 flat, k2 rising 150%.
        let k1 = metrics::compute("A", "k1", &[10.0, 10.0, 10.0, 10.0]).unwrap();
        let k2 = metrics::compute("A", "k2", &[10.0, 15.0, 15.0, 25.0]).unwrap();

        let summary = sector_summary("A", &[k1, k2]);
        assert_eq!(summary.sentiment_score, 75.0);
        assert_eq!(summary.label, Sentiment::Positive);

        let global = global_summary(std::slice::from_ref(&summary)).unwrap();
        assert_eq!(global.sentiment_score, 75.0);
        assert_eq!(global.label, Sentiment::Positive);
    }
}
