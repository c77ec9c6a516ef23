//! Income dataset cleaner.
//!
//! The income export is tab-separated with amounts formatted as currency
//! (`$52,806`). Rows whose amount is not currency-formatted (`N/A`,
//! footnote markers) are excluded rather than reported.

use std::io::Read;
use std::path::Path;

use civic_stats_dataset_models::IncomeRecord;
use serde::Deserialize;

use crate::DatasetError;
use crate::parsing::parse_currency;
use crate::table::{Delimiter, for_each_row, open};

/// A raw row from the income export.
#[derive(Debug, Deserialize)]
struct RawIncome {
    #[serde(rename = "Zip Code")]
    zip: String,
    #[serde(rename = "Estimated Median Income", default)]
    amount: String,
}

/// Loads and cleans the income export at `path`.
///
/// # Errors
///
/// See [`clean_income`].
pub fn load_income(path: &Path) -> Result<Vec<IncomeRecord>, DatasetError> {
    clean_income(open(path, "income")?)
}

/// Cleans a raw tab-separated income export.
///
/// # Errors
///
/// Returns [`DatasetError::Csv`] if a row cannot be parsed.
pub fn clean_income(reader: impl Read) -> Result<Vec<IncomeRecord>, DatasetError> {
    let mut records = Vec::new();

    let total = for_each_row(reader, Delimiter::Tab, |row, raw: RawIncome| {
        match parse_currency(&raw.amount) {
            Some(amount) => records.push(IncomeRecord {
                zip: raw.zip,
                amount,
            }),
            None => log::debug!(
                "Skipping income row {row} for zip {}: amount '{}'",
                raw.zip,
                raw.amount
            ),
        }
        Ok(())
    })?;

    log::info!("Cleaned {} of {total} income rows", records.len());

    Ok(records)
}
