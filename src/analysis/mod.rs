//! Trend signal computation and aggregation
//!
//! This module is the decision core of the service:
//! - [`metrics`] turns one keyword's observation series into a
//!   (average, variation %, interpretation) triple
//! - [`aggregate`] rolls keyword triples into per-sector sentiment and
//!   sector sentiment into the global indicator
//!
//! All three classification levels (keyword, sector, global) share the same
//! threshold constants, so the levels cannot drift apart.

pub mod aggregate;
pub mod metrics;

pub use aggregate::{global_summary, sector_summary, GlobalSummary, SectorSummary, Sentiment};
pub use metrics::{KeywordMetric, Trend};

/// A score strictly above this is classified Rising/Positive
pub const RISING_THRESHOLD: f64 = 10.0;

/// A score strictly below this is classified Falling/Negative
pub const FALLING_THRESHOLD: f64 = -10.0;

/// Floor applied to the first sample when computing percent variation.
/// Prevents division by zero and runaway percentages for series starting at 0.
pub const BASELINE_FLOOR: f64 = 1.0;

/// Round to one decimal place, the output precision of every reported value.
///
/// Rounding is applied early (per keyword, then again per summary) to match
/// the reference output; the small drift versus averaging raw values is a
/// deliberate trade-off.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
