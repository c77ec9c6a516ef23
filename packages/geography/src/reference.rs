//! Zip centroid reference table loading.
//!
//! The reference table is a CSV with one row per zip code and the columns
//! `ZIP`, `LAT`, and `LNG`. Zip codes are read as text so leading zeros
//! survive.

use std::io::Read;
use std::path::Path;

use civic_stats_geography_models::{ZipCentroid, ZipReferenceTable};
use serde::Deserialize;

use crate::GeoError;

/// A raw row from the zip centroid CSV.
#[derive(Debug, Deserialize)]
struct ZipCentroidRow {
    #[serde(rename = "ZIP")]
    zip: String,
    #[serde(rename = "LAT")]
    lat: f64,
    #[serde(rename = "LNG")]
    lng: f64,
}

/// Loads the zip reference table from a CSV file on disk.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be opened or any row is invalid.
pub fn load_zip_table(path: &Path) -> Result<ZipReferenceTable, GeoError> {
    let file = std::fs::File::open(path)?;
    let table = read_zip_table(file)?;
    log::info!(
        "Loaded {} zip centroids from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Reads the zip reference table from any CSV source.
///
/// # Errors
///
/// Returns [`GeoError::Csv`] if a row cannot be parsed, or
/// [`GeoError::InvalidCentroid`] if a row has non-finite coordinates.
pub fn read_zip_table(reader: impl Read) -> Result<ZipReferenceTable, GeoError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut centroids = Vec::new();

    for (i, result) in csv_reader.deserialize::<ZipCentroidRow>().enumerate() {
        let row = result?;
        if !row.lat.is_finite() || !row.lng.is_finite() {
            return Err(GeoError::InvalidCentroid {
                row: i + 1,
                zip: row.zip,
            });
        }
        centroids.push(ZipCentroid::new(row.zip, row.lat, row.lng));
    }

    log::debug!("Parsed {} zip centroid rows", centroids.len());

    Ok(ZipReferenceTable::new(centroids))
}
