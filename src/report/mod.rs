//! Report assembly
//!
//! [`Report`] is the single source of truth a run produces. Its two views,
//! [`TabularReport`] for JSON serialization and [`SheetView`] for the
//! spreadsheet renderer, are pure projections: they format already-computed
//! values and never recompute a metric, so the two outputs cannot disagree.

pub mod excel;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::{GlobalSummary, KeywordMetric, SectorSummary, Sentiment, Trend};

/// Complete result of one pipeline run
#[derive(Debug, Clone)]
pub struct Report {
    /// Run date, also used for the export filename
    pub generated_on: NaiveDate,

    /// All keyword metrics, in sector-then-keyword catalog order
    pub rows: Vec<KeywordMetric>,

    /// One summary per sector that fetched successfully, in catalog order
    pub sectors: Vec<SectorSummary>,

    /// The global sentiment for the run
    pub global: GlobalSummary,
}

impl Report {
    /// Assemble a report from the aggregator outputs
    #[must_use]
    pub fn new(
        generated_on: NaiveDate,
        rows: Vec<KeywordMetric>,
        sectors: Vec<SectorSummary>,
        global: GlobalSummary,
    ) -> Self {
        Self {
            generated_on,
            rows,
            sectors,
            global,
        }
    }

    /// The serializable tabular view
    #[must_use]
    pub fn tabular(&self) -> TabularReport {
        TabularReport {
            date: self.generated_on,
            rows: self.rows.clone(),
            sectors: self
                .sectors
                .iter()
                .map(|s| {
                    (
                        s.sector.clone(),
                        SectorOutlook {
                            sentiment_score: s.sentiment_score,
                            label: s.label,
                        },
                    )
                })
                .collect(),
            global: self.global.clone(),
        }
    }

    /// The spreadsheet view: header, color-toned data rows, then one
    /// textual line per sector summary and one for the global summary
    #[must_use]
    pub fn sheet(&self) -> SheetView {
        let rows = self
            .rows
            .iter()
            .map(|m| SheetRow {
                sector: m.sector.clone(),
                keyword: m.keyword.clone(),
                average: m.average,
                variation_pct: m.variation_pct,
                interpretation: m.interpretation,
                tone: Tone::from_trend(m.interpretation),
            })
            .collect();

        let mut footers: Vec<String> = self
            .sectors
            .iter()
            .map(|s| {
                format!(
                    "{}: {:.1}% ({})",
                    s.sector,
                    s.sentiment_score,
                    s.label.as_str()
                )
            })
            .collect();
        footers.push(format!(
            "Global sentiment: {:.1}% ({})",
            self.global.sentiment_score,
            self.global.label.as_str()
        ));

        SheetView {
            header: SHEET_HEADER,
            rows,
            footers,
        }
    }
}

/// Flat, serialization-ready view of a [`Report`]
#[derive(Debug, Clone, Serialize)]
pub struct TabularReport {
    /// Run date
    pub date: NaiveDate,

    /// Keyword metric rows
    pub rows: Vec<KeywordMetric>,

    /// Sector name to sector sentiment
    pub sectors: BTreeMap<String, SectorOutlook>,

    /// Global sentiment
    pub global: GlobalSummary,
}

/// Sector sentiment as exposed in the tabular view
#[derive(Debug, Clone, Serialize)]
pub struct SectorOutlook {
    /// Mean of the sector's keyword variations
    pub sentiment_score: f64,

    /// Classification of the score
    pub label: Sentiment,
}

/// Column headers of the spreadsheet view
pub const SHEET_HEADER: [&str; 5] =
    ["Sector", "Keyword", "Average", "Variation %", "Interpretation"];

/// Spreadsheet-ready view of a [`Report`]
#[derive(Debug, Clone)]
pub struct SheetView {
    /// Header row
    pub header: [&'static str; 5],

    /// One row per keyword metric
    pub rows: Vec<SheetRow>,

    /// Sector summary lines followed by the global summary line
    pub footers: Vec<String>,
}

/// One data row of the spreadsheet view
#[derive(Debug, Clone)]
pub struct SheetRow {
    pub sector: String,
    pub keyword: String,
    pub average: f64,
    pub variation_pct: f64,
    pub interpretation: Trend,

    /// Cell color class for the row
    pub tone: Tone,
}

/// Three-way color class for spreadsheet rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Rising keyword, green fill
    Positive,

    /// Falling keyword, red fill
    Negative,

    /// Stable keyword, neutral fill
    Neutral,
}

impl Tone {
    /// Derive the color class from the already-computed interpretation.
    /// The view never re-applies thresholds.
    #[must_use]
    pub fn from_trend(trend: Trend) -> Self {
        match trend {
            Trend::Rising => Self::Positive,
            Trend::Falling => Self::Negative,
            Trend::Stable => Self::Neutral,
        }
    }
}
