#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location decoding and nearest-zip resolution.
//!
//! Raw arrest and crime rows carry their coordinates as a serialized
//! mapping (`{'latitude': '34.05', 'longitude': '-118.25'}`). This crate
//! decodes those strings into [`GeoPoint`]s and assigns each point the zip
//! code whose centroid is closest in degree space, either one at a time or
//! in parallel over a whole dataset.
//!
//! [`GeoPoint`]: civic_stats_geography_models::GeoPoint

pub mod batch;
pub mod location;
pub mod progress;
pub mod reference;
pub mod resolver;

use thiserror::Error;

/// Errors that can occur during geography operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// A location string is missing a coordinate or has a non-numeric one.
    #[error("Malformed location '{input}': {reason}")]
    MalformedLocation {
        /// The raw location text.
        input: String,
        /// Description of what went wrong.
        reason: String,
    },

    /// A query point has a NaN or infinite coordinate.
    #[error("Non-finite point ({latitude}, {longitude})")]
    NonFinitePoint { latitude: f64, longitude: f64 },

    /// The resolver was given no candidate centroids.
    #[error("Zip reference table is empty")]
    EmptyReferenceTable,

    /// A reference table row has unusable coordinates.
    #[error("Invalid centroid for zip '{zip}' at row {row}")]
    InvalidCentroid {
        /// 1-based data row number.
        row: usize,
        /// Zip code on that row.
        zip: String,
    },

    /// Reading the reference table failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing the reference table failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
