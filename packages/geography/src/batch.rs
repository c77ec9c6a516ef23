//! Parallel zip resolution over whole datasets.
//!
//! Every row is independent and the reference table is only read, so rows
//! are split into chunks and resolved on the `rayon` pool. Results come
//! back in input order.

use civic_stats_geography_models::{GeoPoint, ZipReferenceTable};
use rayon::prelude::*;

use crate::GeoError;
use crate::location::decode_location;
use crate::progress::ProgressCallback;
use crate::resolver::resolve;

/// Rows handed to a worker at a time. Also the progress update granularity.
const CHUNK_SIZE: usize = 4096;

/// Resolves the nearest zip code for every point.
///
/// # Errors
///
/// Returns [`GeoError::EmptyReferenceTable`] if `table` has no centroids.
/// No rows are processed in that case. Returns
/// [`GeoError::NonFinitePoint`] if any point has a NaN or infinite
/// coordinate.
pub fn resolve_batch<'a>(
    points: &[GeoPoint],
    table: &'a ZipReferenceTable,
    progress: &dyn ProgressCallback,
) -> Result<Vec<&'a str>, GeoError> {
    if table.is_empty() {
        return Err(GeoError::EmptyReferenceTable);
    }

    progress.set_total(points.len() as u64);
    progress.set_message(format!("Resolving {} points", points.len()));

    let chunks = points
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| {
            let zips = chunk
                .iter()
                .map(|point| resolve(point, table))
                .collect::<Result<Vec<_>, _>>();
            progress.inc(chunk.len() as u64);
            zips
        })
        .collect::<Result<Vec<_>, _>>()?;

    progress.finish(format!("Resolved {} points", points.len()));

    Ok(chunks.into_iter().flatten().collect())
}

/// Decodes and resolves a column of raw location strings.
///
/// Each row gets its own result so the caller can decide whether a
/// malformed location aborts the batch or is skipped.
///
/// # Errors
///
/// Returns [`GeoError::EmptyReferenceTable`] if `table` has no centroids.
pub fn resolve_locations<'a, S>(
    locations: &[S],
    table: &'a ZipReferenceTable,
    progress: &dyn ProgressCallback,
) -> Result<Vec<Result<&'a str, GeoError>>, GeoError>
where
    S: AsRef<str> + Sync,
{
    if table.is_empty() {
        return Err(GeoError::EmptyReferenceTable);
    }

    progress.set_total(locations.len() as u64);
    progress.set_message(format!("Resolving {} locations", locations.len()));

    let chunks: Vec<Vec<Result<&'a str, GeoError>>> = locations
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| {
            let zips = chunk
                .iter()
                .map(|raw| decode_location(raw.as_ref()).and_then(|p| resolve(&p, table)))
                .collect();
            progress.inc(chunk.len() as u64);
            zips
        })
        .collect();

    let results: Vec<_> = chunks.into_iter().flatten().collect();
    let failed = results.iter().filter(|r| r.is_err()).count();

    progress.finish(format!(
        "Resolved {} locations ({failed} malformed)",
        results.len()
    ));
    log::info!(
        "Resolved {} of {} locations ({failed} malformed)",
        results.len() - failed,
        results.len()
    );

    Ok(results)
}
