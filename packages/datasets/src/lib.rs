#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset cleaners for the civic datasets.
//!
//! Each cleaner reads one raw delimited export, keeps the handful of
//! columns the metrics need, derives year/date keys, and drops rows that
//! the dataset's policy excludes. Every cleaner has a `clean_*` form that
//! reads from any [`std::io::Read`] and a `load_*` form that opens a path.

pub mod arrest;
pub mod crime;
pub mod dst;
pub mod full_moon;
pub mod income;
pub mod parsing;
pub mod race;
pub mod table;

use thiserror::Error;

/// Errors that can occur while loading or querying datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A DST lookup was made for a year the table does not cover.
    #[error("Year {year} not found in DST table")]
    YearNotFound {
        /// The queried calendar year.
        year: i32,
    },

    /// A column that must be an integer held something else.
    #[error("Invalid integer in column '{column}' at row {row}: '{value}'")]
    InvalidInteger {
        /// 1-based data row number.
        row: usize,
        /// Source column header.
        column: String,
        /// The offending value.
        value: String,
    },

    /// A date column could not be parsed.
    #[error("Invalid date at row {row}: '{value}'")]
    InvalidDate {
        /// 1-based data row number.
        row: usize,
        /// The offending value.
        value: String,
    },

    /// Opening or reading a source file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing delimited text failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
