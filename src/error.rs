//! Error types for the veille service
//!
//! This module defines the error types used throughout the application.
//! Per-sector fetch failures are recoverable and never abort a run; only
//! [`PipelineError`] and [`RenderError`] propagate to the caller, as two
//! distinct kinds so "no data available" and "rendering defect" can be
//! told apart at the service boundary.

use thiserror::Error;

/// Errors that can occur while fetching interest series from the source
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The source rejected the request for rate-limit reasons (429)
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Non-success status code from the source
    #[error("Server error: {0}")]
    Status(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body could not be interpreted
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The explore response carried no time-series widget
    #[error("No TIMESERIES widget in explore response")]
    MissingTimeseriesWidget,
}

/// Run-level pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    /// No sector produced any sentiment score; there is no meaningful
    /// global sentiment to report
    #[error("No sector produced any usable data")]
    NoData,
}

/// Spreadsheet rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Workbook assembly failed
    #[error("Spreadsheet assembly failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}
