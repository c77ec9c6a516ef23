//! Crime dataset cleaner.

use std::io::Read;
use std::path::Path;

use civic_stats_dataset_models::CrimeRecord;
use serde::Deserialize;

use crate::DatasetError;
use crate::parsing::prefix;
use crate::table::{Delimiter, for_each_row, open};

/// A raw row from the crime export.
#[derive(Debug, Deserialize)]
struct RawCrime {
    #[serde(rename = "DR Number")]
    dr_number: String,
    #[serde(rename = "Date Occurred")]
    date_occurred: String,
    #[serde(rename = "Crime Code", default)]
    crime_code: String,
    #[serde(rename = "Crime Code Description", default)]
    crime_description: String,
    #[serde(rename = "Location", default)]
    location: String,
}

/// Loads and cleans the crime export at `path`.
///
/// # Errors
///
/// See [`clean_crimes`].
pub fn load_crimes(path: &Path) -> Result<Vec<CrimeRecord>, DatasetError> {
    clean_crimes(open(path, "crime")?)
}

/// Cleans a raw crime export, deriving the `year` and `crime_date` keys.
///
/// No rows are dropped.
///
/// # Errors
///
/// Returns [`DatasetError::Csv`] if a row cannot be parsed.
pub fn clean_crimes(reader: impl Read) -> Result<Vec<CrimeRecord>, DatasetError> {
    let mut records = Vec::new();

    for_each_row(reader, Delimiter::Comma, |_, raw: RawCrime| {
        records.push(CrimeRecord {
            dr_number: raw.dr_number,
            year: prefix(&raw.date_occurred, 4).to_string(),
            crime_date: prefix(&raw.date_occurred, 10).to_string(),
            date_occurred: raw.date_occurred,
            crime_code: raw.crime_code,
            crime_description: raw.crime_description,
            location: raw.location,
            zip: None,
        });
        Ok(())
    })?;

    log::info!("Cleaned {} crime rows", records.len());

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_year_and_crime_date() {
        let csv = "DR Number,Date Reported,Date Occurred,Crime Code,Crime Code Description,Location\n\
                   101005,2010-01-05T00:00:00,2010-01-03T00:00:00,510,VEHICLE - STOLEN,\"{'latitude': '34.0', 'longitude': '-118.2'}\"\n\
                   101006,2010-01-06T00:00:00,2010-01,330,BURGLARY FROM VEHICLE,\n";
        let records = clean_crimes(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, "2010");
        assert_eq!(records[0].crime_date, "2010-01-03");
        assert_eq!(records[0].crime_code, "510");
        assert_eq!(records[0].crime_description, "VEHICLE - STOLEN");
        assert_eq!(records[1].crime_date, "2010-01");
        assert_eq!(records[1].location, "");
    }

    #[test]
    fn header_only_export_is_empty() {
        let csv = "DR Number,Date Occurred,Crime Code,Crime Code Description,Location\n";
        assert!(clean_crimes(csv.as_bytes()).unwrap().is_empty());
    }
}
