//! Daylight saving time boundaries.
//!
//! The DST export lists, per year, the month/day on which DST starts and
//! ends (`March 9`, sometimes with a weekday prefix like `Sunday, March 9`).
//! Full timestamps are built by appending the year, at midnight.

use std::io::Read;
use std::path::Path;

use chrono::{Datelike as _, NaiveDate, NaiveDateTime, NaiveTime};
use civic_stats_dataset_models::{DstInterval, DstTable};
use serde::Deserialize;

use crate::DatasetError;
use crate::table::{Delimiter, for_each_row, open};

/// A raw row from the DST export.
#[derive(Debug, Deserialize)]
struct RawDst {
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Start")]
    start: String,
    #[serde(rename = "End")]
    end: String,
}

/// Loads and cleans the DST export at `path`.
///
/// # Errors
///
/// See [`clean_dst`].
pub fn load_dst(path: &Path) -> Result<DstTable, DatasetError> {
    clean_dst(open(path, "DST")?)
}

/// Cleans a raw DST export into a per-year lookup table.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidInteger`] for a bad year,
/// [`DatasetError::InvalidDate`] for a month/day that does not form a date
/// in that year, or [`DatasetError::Csv`] if a row cannot be parsed.
pub fn clean_dst(reader: impl Read) -> Result<DstTable, DatasetError> {
    let mut intervals = Vec::new();

    for_each_row(reader, Delimiter::Comma, |row, raw: RawDst| {
        let year = raw
            .year
            .parse::<i32>()
            .map_err(|_| DatasetError::InvalidInteger {
                row,
                column: "Year".to_string(),
                value: raw.year.clone(),
            })?;

        intervals.push(DstInterval {
            year,
            start: complete_timestamp(row, &raw.start, year)?,
            end: complete_timestamp(row, &raw.end, year)?,
        });
        Ok(())
    })?;

    let table = DstTable::new(intervals);
    log::info!("Loaded DST intervals for {} years", table.len());

    Ok(table)
}

/// Returns whether daylight saving time is in effect at `at`.
///
/// # Errors
///
/// Returns [`DatasetError::YearNotFound`] if `table` has no interval for
/// the year of `at`.
pub fn in_dst(at: NaiveDateTime, table: &DstTable) -> Result<bool, DatasetError> {
    let year = at.year();
    table
        .get(year)
        .map(|interval| interval.contains(at))
        .ok_or(DatasetError::YearNotFound { year })
}

/// Date-only form of [`in_dst`], evaluated at midnight.
///
/// # Errors
///
/// Returns [`DatasetError::YearNotFound`] if `table` has no interval for
/// the year of `date`.
pub fn in_dst_on(date: NaiveDate, table: &DstTable) -> Result<bool, DatasetError> {
    in_dst(date.and_time(NaiveTime::MIN), table)
}

fn complete_timestamp(
    row: usize,
    month_day: &str,
    year: i32,
) -> Result<NaiveDateTime, DatasetError> {
    // Drop a leading weekday ("Sunday, March 9").
    let month_day = month_day
        .split_once(',')
        .map_or(month_day, |(_, rest)| rest)
        .trim();

    NaiveDate::parse_from_str(&format!("{month_day} {year}"), "%B %d %Y")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| DatasetError::InvalidDate {
            row,
            value: format!("{month_day} {year}"),
        })
}
