#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Metric result types.
//!
//! Every metric row can be flattened into long-format [`SeriesPoint`]s
//! (`category, bucket, value`), which is the shape charting tools consume.
//! A [`Chart`] pairs those points with a title.

use civic_stats_dataset_models::RaceCategory;
use serde::{Deserialize, Serialize};

/// One `(category, bucket, value)` observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Series name (e.g. `"DST"`, `"Arrests per 100k"`).
    pub category: String,
    /// X-axis bucket (a zip code or a year).
    pub bucket: String,
    pub value: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(category: impl Into<String>, bucket: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            bucket: bucket.into(),
            value,
        }
    }
}

/// Rows that can be flattened into long-format series points.
pub trait Series {
    fn points(&self) -> Vec<SeriesPoint>;
}

/// A titled set of series points ready to hand to a charting tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub title: String,
    pub points: Vec<SeriesPoint>,
}

impl Chart {
    #[must_use]
    pub fn from_rows<T: Series>(title: impl Into<String>, rows: &[T]) -> Self {
        Self {
            title: title.into(),
            points: rows.iter().flat_map(Series::points).collect(),
        }
    }
}

/// Parameters for the race-vs-arrest metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceVsArrestParams {
    /// Charge group description to count, matched case-insensitively.
    pub charge_group: String,
    /// Population category to compare against.
    pub race: RaceCategory,
}

/// Per-zip arrest rate for one charge group alongside one race share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceVsArrestRow {
    pub zip: String,
    pub race: RaceCategory,
    /// Share of the zip's population in `race`, 0-100.
    pub race_percent: f64,
    pub total_population: u64,
    /// Average arrests per year for the selected charge group.
    pub arrests_per_year: f64,
    pub arrests_per_100k: f64,
}

impl Series for RaceVsArrestRow {
    fn points(&self) -> Vec<SeriesPoint> {
        vec![
            SeriesPoint::new(
                format!("{} %", self.race.label()),
                &self.zip,
                self.race_percent,
            ),
            SeriesPoint::new("Arrests per 100k", &self.zip, self.arrests_per_100k),
        ]
    }
}

/// Per-zip crime rate alongside median income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeVsCrimeRow {
    pub zip: String,
    pub income: i64,
    pub total_population: u64,
    /// Average crimes per year.
    pub crimes_per_year: f64,
    pub crime_rate_per_1k: f64,
}

impl Series for IncomeVsCrimeRow {
    fn points(&self) -> Vec<SeriesPoint> {
        #[allow(clippy::cast_precision_loss)]
        let income = self.income as f64;
        vec![
            SeriesPoint::new("Median income", &self.zip, income),
            SeriesPoint::new("Crimes per 1k", &self.zip, self.crime_rate_per_1k),
        ]
    }
}

/// Average crimes per day for one class of days (e.g. DST vs. standard
/// time) within one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRateRow {
    pub year: String,
    /// Day class label.
    pub period: String,
    /// Distinct days with at least one crime in this class.
    pub days: u64,
    pub crimes: u64,
    pub crimes_per_day: f64,
}

impl Series for DailyRateRow {
    fn points(&self) -> Vec<SeriesPoint> {
        vec![SeriesPoint::new(
            &self.period,
            &self.year,
            self.crimes_per_day,
        )]
    }
}

/// Result of a daily-rate comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRateReport {
    pub rows: Vec<DailyRateRow>,
    /// Days left out because they could not be classified.
    pub skipped_days: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_flattens_rows_in_order() {
        let rows = vec![
            DailyRateRow {
                year: "2014".to_string(),
                period: "DST".to_string(),
                days: 2,
                crimes: 10,
                crimes_per_day: 5.0,
            },
            DailyRateRow {
                year: "2014".to_string(),
                period: "Standard".to_string(),
                days: 1,
                crimes: 3,
                crimes_per_day: 3.0,
            },
        ];
        let chart = Chart::from_rows("Crimes per day", &rows);
        assert_eq!(chart.title, "Crimes per day");
        assert_eq!(
            chart.points,
            vec![
                SeriesPoint::new("DST", "2014", 5.0),
                SeriesPoint::new("Standard", "2014", 3.0),
            ]
        );
    }

    #[test]
    fn race_row_emits_two_series() {
        let row = RaceVsArrestRow {
            zip: "90001".to_string(),
            race: RaceCategory::Hispanic,
            race_percent: 90.0,
            total_population: 50_000,
            arrests_per_year: 100.0,
            arrests_per_100k: 200.0,
        };
        let points = row.points();
        assert_eq!(points[0].category, "Hispanic %");
        assert_eq!(points[1], SeriesPoint::new("Arrests per 100k", "90001", 200.0));
    }
}
