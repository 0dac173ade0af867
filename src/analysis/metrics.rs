//! Per-keyword metric computation
//!
//! Converts one keyword's observation series into its metric triple:
//! average level, percent variation from first to last sample, and a
//! three-way interpretation.

use serde::{Deserialize, Serialize};

use super::{round1, BASELINE_FLOOR, FALLING_THRESHOLD, RISING_THRESHOLD};

/// Three-way interpretation of a keyword's variation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    /// Variation strictly above +10%
    Rising,

    /// Variation strictly below -10%
    Falling,

    /// Everything in between, boundaries included
    Stable,
}

impl Trend {
    /// Classify a variation percentage
    ///
    /// # Classification
    /// - `variation_pct > 10`: Rising
    /// - `variation_pct < -10`: Falling
    /// - otherwise (exactly 10 or -10 included): Stable
    #[must_use]
    pub fn from_variation(variation_pct: f64) -> Self {
        if variation_pct > RISING_THRESHOLD {
            Self::Rising
        } else if variation_pct < FALLING_THRESHOLD {
            Self::Falling
        } else {
            Self::Stable
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "Rising",
            Self::Falling => "Falling",
            Self::Stable => "Stable",
        }
    }
}

/// Computed metric triple for one keyword of one sector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordMetric {
    /// Sector the keyword belongs to
    pub sector: String,

    /// The search keyword
    pub keyword: String,

    /// Arithmetic mean of the series, rounded to 1 decimal
    pub average: f64,

    /// Percent change from first to last sample, rounded to 1 decimal.
    /// Computed against a floor-protected baseline of `max(first, 1)`.
    pub variation_pct: f64,

    /// Interpretation of the variation
    pub interpretation: Trend,
}

/// Compute the metric triple for one keyword's observation series.
///
/// Returns `None` for an empty series: an absent or empty column means
/// "no data for this keyword" and the keyword is skipped upstream, not
/// treated as an error.
#[must_use]
pub fn compute(sector: &str, keyword: &str, series: &[f64]) -> Option<KeywordMetric> {
    let first = *series.first()?;
    let last = *series.last()?;

    let average = round1(series.iter().sum::<f64>() / series.len() as f64);

    let baseline = first.max(BASELINE_FLOOR);
    let variation_pct = round1((last - first) / baseline * 100.0);

    Some(KeywordMetric {
        sector: sector.to_string(),
        keyword: keyword.to_string(),
        average,
        variation_pct,
        interpretation: Trend::from_variation(variation_pct),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_is_skipped() {
        assert!(compute("A", "k", &[]).is_none());
    }

    #[test]
    fn test_flat_series() {
        let metric = compute("A", "k1", &[10.0, 10.0, 10.0, 10.0]).unwrap();
        assert_eq!(metric.average, 10.0);
        assert_eq!(metric.variation_pct, 0.0);
        assert_eq!(metric.interpretation, Trend::Stable);
    }

    #[test]
    fn test_rising_series() {
        // avg = (10 + 15 + 15 + 25) / 4 = 16.25 -> 16.3 (round half away from zero)
        let metric = compute("A", "k2", &[10.0, 15.0, 15.0, 25.0]).unwrap();
        assert_eq!(metric.average, 16.3);
        assert_eq!(metric.variation_pct, 150.0);
        assert_eq!(metric.interpretation, Trend::Rising);
    }

    #[test]
    fn test_zero_baseline_uses_floor() {
        // first = 0, last = 5: baseline floored to 1 -> 500%, not a division by zero
        let metric = compute("A", "k", &[0.0, 2.0, 5.0]).unwrap();
        assert_eq!(metric.variation_pct, 500.0);
        assert_eq!(metric.interpretation, Trend::Rising);
    }

    #[test]
    fn test_single_sample_series() {
        // first == last: variation is 0 regardless of level
        let metric = compute("A", "k", &[42.0]).unwrap();
        assert_eq!(metric.average, 42.0);
        assert_eq!(metric.variation_pct, 0.0);
    }

    #[test]
    fn test_interpretation_boundaries() {
        // Thresholds are strict: exactly +-10 is Stable
        assert_eq!(Trend::from_variation(10.0), Trend::Stable);
        assert_eq!(Trend::from_variation(10.1), Trend::Rising);
        assert_eq!(Trend::from_variation(-10.0), Trend::Stable);
        assert_eq!(Trend::from_variation(-10.1), Trend::Falling);
    }

    #[test]
    fn test_falling_series() {
        // (2 - 50) / 50 * 100 = -96
        let metric = compute("A", "k", &[50.0, 30.0, 2.0]).unwrap();
        assert_eq!(metric.variation_pct, -96.0);
        assert_eq!(metric.interpretation, Trend::Falling);
    }
}
