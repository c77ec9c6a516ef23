//! Average crimes per day, split by a per-day classification.
//!
//! Crimes are counted per `crime_date`, each day is classified (DST vs.
//! standard time, full moon vs. not), and each year gets the mean daily
//! count for both classes. Days that cannot be classified are skipped and
//! counted rather than aborting the whole comparison.

use std::collections::BTreeMap;
use std::convert::Infallible;

use chrono::{Datelike as _, NaiveDate};
use civic_stats_analytics_models::{DailyRateReport, DailyRateRow};
use civic_stats_dataset_models::{CrimeRecord, DstTable, FullMoonCalendar};
use civic_stats_datasets::DatasetError;
use civic_stats_datasets::dst::in_dst_on;
use civic_stats_datasets::parsing::parse_date_key;

use crate::AnalyticsError;

pub const DST_LABEL: &str = "DST";
pub const STANDARD_TIME_LABEL: &str = "Standard time";
pub const FULL_MOON_LABEL: &str = "Full moon";
pub const OTHER_NIGHTS_LABEL: &str = "Other nights";

#[derive(Default)]
struct Accum {
    days: u64,
    crimes: u64,
}

/// Compares average daily crime counts inside and outside DST.
///
/// Days whose year has no DST interval are skipped.
///
/// # Errors
///
/// Returns [`AnalyticsError::Dataset`] for any lookup failure other than a
/// missing year.
pub fn dst_vs_crime(
    crimes: &[CrimeRecord],
    table: &DstTable,
) -> Result<DailyRateReport, AnalyticsError> {
    daily_rates(crimes, (DST_LABEL, STANDARD_TIME_LABEL), |date| {
        match in_dst_on(date, table) {
            Ok(in_dst) => Ok(Some(in_dst)),
            Err(DatasetError::YearNotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    })
}

/// Compares average daily crime counts on full-moon days against all
/// other days.
#[must_use]
pub fn full_moon_vs_crime(crimes: &[CrimeRecord], calendar: &FullMoonCalendar) -> DailyRateReport {
    let Ok(report) = daily_rates(crimes, (FULL_MOON_LABEL, OTHER_NIGHTS_LABEL), |date| {
        Ok::<_, Infallible>(Some(calendar.is_full_moon(date)))
    });
    report
}

/// Counts crimes per day and averages them per year for each class.
///
/// `classify` returns `Some(true)` for the first label, `Some(false)` for
/// the second, and `None` to skip the day. Rows are ordered by year, first
/// label before second; a class with no days in a year gets no row.
///
/// # Errors
///
/// Propagates any error returned by `classify`.
pub fn daily_rates<F, E>(
    crimes: &[CrimeRecord],
    (yes_label, no_label): (&str, &str),
    mut classify: F,
) -> Result<DailyRateReport, E>
where
    F: FnMut(NaiveDate) -> Result<Option<bool>, E>,
{
    let mut per_day: BTreeMap<&str, u64> = BTreeMap::new();
    for crime in crimes {
        *per_day.entry(crime.crime_date.as_str()).or_insert(0) += 1;
    }

    let mut per_year: BTreeMap<(String, bool), Accum> = BTreeMap::new();
    let mut skipped_days = 0u64;

    for (key, count) in per_day {
        let Some(date) = parse_date_key(key) else {
            log::debug!("Skipping unparseable crime date '{key}'");
            skipped_days += 1;
            continue;
        };
        let Some(class) = classify(date)? else {
            skipped_days += 1;
            continue;
        };

        // `!class` so the first label sorts first within a year.
        let accum = per_year
            .entry((date.year().to_string(), !class))
            .or_default();
        accum.days += 1;
        accum.crimes += count;
    }

    if skipped_days > 0 {
        log::warn!("Skipped {skipped_days} days that could not be classified");
    }

    let rows = per_year
        .into_iter()
        .map(|((year, not_class), accum)| {
            #[allow(clippy::cast_precision_loss)]
            let crimes_per_day = accum.crimes as f64 / accum.days as f64;
            DailyRateRow {
                year,
                period: if not_class { no_label } else { yes_label }.to_string(),
                days: accum.days,
                crimes: accum.crimes,
                crimes_per_day,
            }
        })
        .collect();

    Ok(DailyRateReport { rows, skipped_days })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use civic_stats_dataset_models::DstInterval;

    use super::*;

    fn crime_on(date: &str) -> CrimeRecord {
        CrimeRecord {
            dr_number: "1".to_string(),
            date_occurred: format!("{date}T00:00:00"),
            year: date.get(..4).unwrap_or(date).to_string(),
            crime_date: date.to_string(),
            crime_code: "624".to_string(),
            crime_description: "BATTERY - SIMPLE ASSAULT".to_string(),
            location: String::new(),
            zip: None,
        }
    }

    fn dst_2014() -> DstTable {
        let at = |m, d| {
            NaiveDate::from_ymd_opt(2014, m, d)
                .unwrap()
                .and_time(NaiveTime::MIN)
        };
        DstTable::new([DstInterval {
            year: 2014,
            start: at(3, 9),
            end: at(11, 2),
        }])
    }

    #[test]
    fn averages_daily_counts_per_class() {
        let crimes: Vec<CrimeRecord> = [
            "2014-03-08",
            "2014-03-08",
            "2014-03-09",
            "2014-03-09",
            "2014-03-09",
            "2014-03-09",
            "2014-07-04",
            "2014-07-04",
            "2014-11-02",
            "2014-11-02",
            "2014-11-02",
            "2014-11-02",
        ]
        .into_iter()
        .map(crime_on)
        .collect();

        let report = dst_vs_crime(&crimes, &dst_2014()).unwrap();
        assert_eq!(report.skipped_days, 0);
        assert_eq!(report.rows.len(), 2);

        let dst = &report.rows[0];
        assert_eq!(dst.period, DST_LABEL);
        assert_eq!(dst.year, "2014");
        assert_eq!(dst.days, 2);
        assert_eq!(dst.crimes, 6);
        assert!((dst.crimes_per_day - 3.0).abs() < 1e-9);

        let standard = &report.rows[1];
        assert_eq!(standard.period, STANDARD_TIME_LABEL);
        assert_eq!(standard.days, 2);
        assert!((standard.crimes_per_day - 3.0).abs() < 1e-9);
    }

    #[test]
    fn skips_years_missing_from_dst_table() {
        let crimes = vec![crime_on("2014-05-01"), crime_on("2015-05-01"), crime_on("bad")];
        let report = dst_vs_crime(&crimes, &dst_2014()).unwrap();
        assert_eq!(report.skipped_days, 2);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].period, DST_LABEL);
    }

    #[test]
    fn full_moon_days_are_separated() {
        let calendar = FullMoonCalendar::new([NaiveDate::from_ymd_opt(2014, 1, 16).unwrap()]);
        let crimes: Vec<CrimeRecord> = ["2014-01-16", "2014-01-16", "2014-01-17"]
            .into_iter()
            .map(crime_on)
            .collect();

        let report = full_moon_vs_crime(&crimes, &calendar);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].period, FULL_MOON_LABEL);
        assert!((report.rows[0].crimes_per_day - 2.0).abs() < 1e-9);
        assert_eq!(report.rows[1].period, OTHER_NIGHTS_LABEL);
        assert!((report.rows[1].crimes_per_day - 1.0).abs() < 1e-9);
    }
}
