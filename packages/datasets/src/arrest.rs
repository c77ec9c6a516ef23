//! Arrest dataset cleaner.

use std::io::Read;
use std::path::Path;

use civic_stats_dataset_models::ArrestRecord;
use serde::Deserialize;

use crate::DatasetError;
use crate::parsing::{parse_integer, prefix};
use crate::table::{Delimiter, for_each_row, open};

const CHARGE_GROUP_CODE: &str = "Charge Group Code";

/// A raw row from the arrest export.
#[derive(Debug, Deserialize)]
struct RawArrest {
    #[serde(rename = "Report ID")]
    report_id: String,
    #[serde(rename = "Arrest Date")]
    arrest_date: String,
    #[serde(rename = "Charge Group Code", default)]
    charge_group_code: Option<String>,
    #[serde(rename = "Charge Group Description", default)]
    charge_group_description: Option<String>,
    #[serde(rename = "Location", default)]
    location: String,
}

/// Loads and cleans the arrest export at `path`.
///
/// # Errors
///
/// See [`clean_arrests`].
pub fn load_arrests(path: &Path) -> Result<Vec<ArrestRecord>, DatasetError> {
    clean_arrests(open(path, "arrest")?)
}

/// Cleans a raw arrest export.
///
/// Rows with an empty charge-group code or description are dropped; the
/// remaining codes are coerced to integers.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidInteger`] if a charge-group code is not a
/// whole number, or [`DatasetError::Csv`] if a row cannot be parsed.
pub fn clean_arrests(reader: impl Read) -> Result<Vec<ArrestRecord>, DatasetError> {
    let mut records = Vec::new();
    let mut dropped = 0u64;

    let total = for_each_row(reader, Delimiter::Comma, |row, raw: RawArrest| {
        let (Some(code), Some(description)) = (
            non_empty(raw.charge_group_code),
            non_empty(raw.charge_group_description),
        ) else {
            dropped += 1;
            return Ok(());
        };

        let charge_group_code =
            parse_integer(&code).ok_or_else(|| DatasetError::InvalidInteger {
                row,
                column: CHARGE_GROUP_CODE.to_string(),
                value: code.clone(),
            })?;

        records.push(ArrestRecord {
            report_id: raw.report_id,
            year: prefix(&raw.arrest_date, 4).to_string(),
            arrest_date: raw.arrest_date,
            charge_group_code,
            charge_group_description: description,
            location: raw.location,
            zip: None,
        });
        Ok(())
    })?;

    log::info!(
        "Cleaned {} of {total} arrest rows ({dropped} missing charge group)",
        records.len()
    );

    Ok(records)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
