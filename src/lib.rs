//! veille - Consumer sector search-interest sentiment service
//!
//! Periodically pulls short-horizon search-interest time series for a fixed
//! catalog of consumer sectors, derives per-keyword and per-sector trend
//! signals, aggregates them into one global sentiment indicator, and serves
//! the result as JSON or as a styled Excel export.
//!
//! # Architecture
//!
//! - [`catalog`] - Sector-to-keywords catalog (injected configuration)
//! - [`trends`] - Search-interest data source client with rate limiting
//! - [`analysis`] - Trend signal computation and two-level aggregation
//! - [`pipeline`] - Sequential per-sector report generation
//! - [`report`] - Report assembly and its JSON/spreadsheet views
//! - [`server`] - Axum HTTP service
//! - [`config`] - Service configuration
//!
//! # Example
//!
//! ```no_run
//! use veille::config::Config;
//! use veille::server::ReportServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = ReportServer::new(config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod server;
pub mod trends;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::{GlobalSummary, KeywordMetric, SectorSummary, Sentiment, Trend};
    pub use crate::catalog::SectorCatalog;
    pub use crate::config::Config;
    pub use crate::error::{FetchError, PipelineError, RenderError};
    pub use crate::pipeline::{FixedPause, NoPause, PausePolicy, ReportPipeline};
    pub use crate::report::Report;
    pub use crate::server::ReportServer;
    pub use crate::trends::{InterestTable, SeriesFetcher, TrendsClient};
}
