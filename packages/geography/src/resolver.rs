//! Nearest-zip resolution.
//!
//! A brute-force scan over the reference table. The table holds roughly a
//! thousand centroids for a metropolitan region, which is small enough that
//! a linear pass per point beats building any spatial index.

use civic_stats_geography_models::{GeoPoint, ZipCentroid, ZipReferenceTable};

use crate::GeoError;

/// Finds the centroid closest to `point` by squared degree-space distance.
///
/// Ties go to the centroid that appears first in the table: a later
/// candidate only replaces the current best when it is strictly closer.
///
/// # Errors
///
/// Returns [`GeoError::NonFinitePoint`] if either coordinate of `point` is
/// NaN or infinite, or [`GeoError::EmptyReferenceTable`] if `table` has no
/// centroids.
pub fn nearest_centroid<'a>(
    point: &GeoPoint,
    table: &'a ZipReferenceTable,
) -> Result<&'a ZipCentroid, GeoError> {
    if !point.latitude.is_finite() || !point.longitude.is_finite() {
        return Err(GeoError::NonFinitePoint {
            latitude: point.latitude,
            longitude: point.longitude,
        });
    }

    let mut best: Option<(f64, &ZipCentroid)> = None;

    for centroid in table {
        let distance = point.squared_distance(&centroid.point());
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, centroid)),
        }
    }

    best.map(|(_, centroid)| centroid)
        .ok_or(GeoError::EmptyReferenceTable)
}

/// Returns the zip code of the centroid closest to `point`.
///
/// # Errors
///
/// See [`nearest_centroid`].
pub fn resolve<'a>(point: &GeoPoint, table: &'a ZipReferenceTable) -> Result<&'a str, GeoError> {
    nearest_centroid(point, table).map(|c| c.zip.as_str())
}
