//! Fills in the `zip` column of location-bearing records.

use civic_stats_dataset_models::{ArrestRecord, CrimeRecord};
use civic_stats_geography::batch::resolve_locations;
use civic_stats_geography::progress::ProgressCallback;
use civic_stats_geography_models::ZipReferenceTable;

use crate::CliError;

/// A record carrying a serialized location and an optional resolved zip.
pub trait Located {
    fn location(&self) -> &str;
    fn set_zip(&mut self, zip: String);
}

impl Located for ArrestRecord {
    fn location(&self) -> &str {
        &self.location
    }

    fn set_zip(&mut self, zip: String) {
        self.zip = Some(zip);
    }
}

impl Located for CrimeRecord {
    fn location(&self) -> &str {
        &self.location
    }

    fn set_zip(&mut self, zip: String) {
        self.zip = Some(zip);
    }
}

/// Resolves the nearest zip for every record.
///
/// With `skip_malformed`, records whose location cannot be decoded are
/// dropped and counted. Otherwise the first one aborts the run.
///
/// # Errors
///
/// Returns [`CliError::Geo`] if the reference table is empty, or
/// [`CliError::MalformedRow`] for an undecodable location when not
/// skipping.
pub fn attach_zips<T: Located>(
    records: Vec<T>,
    table: &ZipReferenceTable,
    skip_malformed: bool,
    progress: &dyn ProgressCallback,
) -> Result<Vec<T>, CliError> {
    let locations: Vec<&str> = records.iter().map(Located::location).collect();
    let zips: Vec<Result<String, _>> = resolve_locations(&locations, table, progress)?
        .into_iter()
        .map(|zip| zip.map(str::to_string))
        .collect();

    let mut kept = Vec::with_capacity(records.len());
    let mut skipped = 0u64;

    for (index, (mut record, zip)) in records.into_iter().zip(zips).enumerate() {
        match zip {
            Ok(zip) => {
                record.set_zip(zip);
                kept.push(record);
            }
            Err(e) if skip_malformed => {
                log::debug!("Skipping row {}: {e}", index + 1);
                skipped += 1;
            }
            Err(e) => {
                return Err(CliError::MalformedRow {
                    row: index + 1,
                    source: e,
                });
            }
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} rows with malformed locations");
    }

    Ok(kept)
}
