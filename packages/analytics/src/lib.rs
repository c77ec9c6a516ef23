#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Metric builders over the cleaned datasets.
//!
//! Each builder joins cleaned tables by zip code or by day and returns
//! typed rows (see `civic_stats_analytics_models`) that flatten into
//! long-format series for charting.

pub mod daily;
pub mod income_vs_crime;
pub mod race_vs_arrest;
pub mod rates;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A dataset lookup failed.
    #[error("Dataset error: {0}")]
    Dataset(#[from] civic_stats_datasets::DatasetError),

    /// A builder parameter is unusable.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of what went wrong.
        message: String,
    },
}
