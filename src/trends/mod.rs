//! Search-interest data source
//!
//! [`SeriesFetcher`] is the boundary the pipeline consumes: given a keyword
//! set, a time window and a region, return one observation series per
//! keyword or fail. [`TrendsClient`] is the production implementation,
//! speaking the Google Trends widget protocol; tests substitute stub
//! fetchers through the same trait.

pub mod client;
pub mod table;

pub use client::{SeriesFetcher, TrendsClient};
pub use table::InterestTable;
