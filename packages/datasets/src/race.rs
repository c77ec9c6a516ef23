//! Race/population dataset cleaner.

use std::io::Read;
use std::path::Path;

use civic_stats_dataset_models::RaceRecord;
use serde::Deserialize;

use crate::DatasetError;
use crate::parsing::parse_count;
use crate::table::{Delimiter, for_each_row, open};

/// Zips at or below this population are too small for stable per-capita
/// rates and are excluded.
pub const MIN_TOTAL_POPULATION: u64 = 1000;

/// A raw row from the census race breakdown.
#[derive(Debug, Deserialize)]
struct RawRace {
    #[serde(rename = "Zip Code")]
    zip: String,
    #[serde(rename = "Total Population", default)]
    total_population: String,
    #[serde(rename = "White", default)]
    white: String,
    #[serde(rename = "Black", default)]
    black: String,
    #[serde(rename = "American Indian", default)]
    american_indian: String,
    #[serde(rename = "Asian", default)]
    asian: String,
    #[serde(rename = "Pacific Islander", default)]
    pacific_islander: String,
    #[serde(rename = "Other", default)]
    other: String,
    #[serde(rename = "Multiracial", default)]
    multiracial: String,
    #[serde(rename = "Hispanic", default)]
    hispanic: String,
}

/// Loads and cleans the race export at `path`.
///
/// # Errors
///
/// See [`clean_race`].
pub fn load_race(path: &Path) -> Result<Vec<RaceRecord>, DatasetError> {
    clean_race(open(path, "race")?)
}

/// Cleans a raw race export, keeping zips with more than
/// [`MIN_TOTAL_POPULATION`] residents.
///
/// Missing category columns count as zero.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidInteger`] if a count is not a
/// non-negative whole number, or [`DatasetError::Csv`] if a row cannot be
/// parsed.
pub fn clean_race(reader: impl Read) -> Result<Vec<RaceRecord>, DatasetError> {
    let mut records = Vec::new();

    let total = for_each_row(reader, Delimiter::Comma, |row, raw: RawRace| {
        let count = |column: &str, value: &str| {
            parse_count(value).ok_or_else(|| DatasetError::InvalidInteger {
                row,
                column: column.to_string(),
                value: value.to_string(),
            })
        };

        let record = RaceRecord {
            total_population: count("Total Population", &raw.total_population)?,
            white: count("White", &raw.white)?,
            black: count("Black", &raw.black)?,
            american_indian: count("American Indian", &raw.american_indian)?,
            asian: count("Asian", &raw.asian)?,
            pacific_islander: count("Pacific Islander", &raw.pacific_islander)?,
            other: count("Other", &raw.other)?,
            multiracial: count("Multiracial", &raw.multiracial)?,
            hispanic: count("Hispanic", &raw.hispanic)?,
            zip: raw.zip,
        };

        if record.total_population > MIN_TOTAL_POPULATION {
            records.push(record);
        }
        Ok(())
    })?;

    log::info!(
        "Cleaned {} of {total} race rows (population > {MIN_TOTAL_POPULATION})",
        records.len()
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use civic_stats_dataset_models::RaceCategory;

    use super::*;

    const HEADER: &str = "Zip Code,Total Population,White,Black,American Indian,Asian,Pacific Islander,Other,Multiracial,Hispanic\n";

    #[test]
    fn keeps_only_populous_zips() {
        let csv = format!(
            "{HEADER}90001,\"57,110\",1000,5000,100,50,10,20,30,50900\n\
             90002,1000,900,50,0,0,0,0,0,50\n\
             90003,1001,1001,0,0,0,0,0,0,0\n"
        );
        let records = clean_race(csv.as_bytes()).unwrap();

        let zips: Vec<&str> = records.iter().map(|r| r.zip.as_str()).collect();
        assert_eq!(zips, ["90001", "90003"]);
        assert_eq!(records[0].total_population, 57_110);
        assert_eq!(records[0].population(RaceCategory::Hispanic), 50_900);
    }

    #[test]
    fn missing_category_columns_count_as_zero() {
        let csv = "Zip Code,Total Population,Hispanic\n90210,21000,1200\n";
        let records = clean_race(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].white, 0);
        assert_eq!(records[0].hispanic, 1200);
    }

    #[test]
    fn rejects_non_numeric_counts() {
        let csv = format!("{HEADER}90001,lots,0,0,0,0,0,0,0,0\n");
        assert!(matches!(
            clean_race(csv.as_bytes()),
            Err(DatasetError::InvalidInteger { row: 1, .. })
        ));
    }
}
