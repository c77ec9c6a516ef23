//! Full-moon date cleaner.

use std::io::Read;
use std::path::Path;

use civic_stats_dataset_models::FullMoonCalendar;
use serde::Deserialize;

use crate::DatasetError;
use crate::parsing::parse_calendar_date;
use crate::table::{Delimiter, for_each_row, open};

#[derive(Debug, Deserialize)]
struct RawFullMoon {
    #[serde(rename = "Date")]
    date: String,
}

/// Loads and cleans the full-moon export at `path`.
///
/// # Errors
///
/// See [`clean_full_moons`].
pub fn load_full_moons(path: &Path) -> Result<FullMoonCalendar, DatasetError> {
    clean_full_moons(open(path, "full-moon")?)
}

/// Parses every full-moon date into its canonical form.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidDate`] if a date matches none of the
/// supported layouts, or [`DatasetError::Csv`] if a row cannot be parsed.
pub fn clean_full_moons(reader: impl Read) -> Result<FullMoonCalendar, DatasetError> {
    let mut dates = Vec::new();

    for_each_row(reader, Delimiter::Comma, |row, raw: RawFullMoon| {
        let date = parse_calendar_date(&raw.date).ok_or(DatasetError::InvalidDate {
            row,
            value: raw.date,
        })?;
        dates.push(date);
        Ok(())
    })?;

    let calendar = FullMoonCalendar::new(dates);
    log::info!("Loaded {} full-moon dates", calendar.len());

    Ok(calendar)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn parses_mixed_layouts() {
        let csv = "Day,Date,Time\n\
                   Thursday,\"January 16, 2014\",04:52:00\n\
                   Friday,14 February 2014,23:53:00\n\
                   Sunday,2014-03-16,17:08:00\n";
        let calendar = clean_full_moons(csv.as_bytes()).unwrap();

        assert_eq!(calendar.len(), 3);
        assert!(calendar.is_full_moon(NaiveDate::from_ymd_opt(2014, 1, 16).unwrap()));
        assert!(calendar.is_full_moon(NaiveDate::from_ymd_opt(2014, 2, 14).unwrap()));
        assert!(calendar.is_full_moon(NaiveDate::from_ymd_opt(2014, 3, 16).unwrap()));
        assert!(!calendar.is_full_moon(NaiveDate::from_ymd_opt(2014, 3, 17).unwrap()));
    }

    #[test]
    fn rejects_unparseable_dates() {
        let csv = "Date\nthe ides of march\n";
        assert!(matches!(
            clean_full_moons(csv.as_bytes()),
            Err(DatasetError::InvalidDate { row: 1, .. })
        ));
    }
}
