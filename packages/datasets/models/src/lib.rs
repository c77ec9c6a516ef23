#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cleaned record types for the civic datasets.
//!
//! Each type is the narrowed output of one dataset cleaner. Zip codes and
//! years are always text so that leading zeros and source formatting are
//! preserved through every join.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Population categories reported in the census race breakdown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum RaceCategory {
    White,
    Black,
    AmericanIndian,
    Asian,
    PacificIslander,
    Other,
    Multiracial,
    Hispanic,
}

impl RaceCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::White,
            Self::Black,
            Self::AmericanIndian,
            Self::Asian,
            Self::PacificIslander,
            Self::Other,
            Self::Multiracial,
            Self::Hispanic,
        ]
    }

    /// Human-readable label, also used as the source column header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::AmericanIndian => "American Indian",
            Self::Asian => "Asian",
            Self::PacificIslander => "Pacific Islander",
            Self::Other => "Other",
            Self::Multiracial => "Multiracial",
            Self::Hispanic => "Hispanic",
        }
    }
}

/// A cleaned arrest row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrestRecord {
    pub report_id: String,
    /// Raw arrest timestamp as exported (`2019-03-09T00:00:00.000`).
    pub arrest_date: String,
    /// First four characters of `arrest_date`.
    pub year: String,
    pub charge_group_code: i64,
    pub charge_group_description: String,
    /// Serialized location mapping, decoded on demand.
    pub location: String,
    /// Nearest zip code, filled in by zip resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// A cleaned crime row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeRecord {
    pub dr_number: String,
    pub date_occurred: String,
    /// First four characters of `date_occurred`.
    pub year: String,
    /// First ten characters of `date_occurred` (`YYYY-MM-DD`).
    pub crime_date: String,
    pub crime_code: String,
    pub crime_description: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// Median household income for a zip code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    pub zip: String,
    pub amount: i64,
}

/// Population breakdown for a zip code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceRecord {
    pub zip: String,
    pub total_population: u64,
    pub white: u64,
    pub black: u64,
    pub american_indian: u64,
    pub asian: u64,
    pub pacific_islander: u64,
    pub other: u64,
    pub multiracial: u64,
    pub hispanic: u64,
}

impl RaceRecord {
    /// Population of a single category in this zip.
    #[must_use]
    pub const fn population(&self, category: RaceCategory) -> u64 {
        match category {
            RaceCategory::White => self.white,
            RaceCategory::Black => self.black,
            RaceCategory::AmericanIndian => self.american_indian,
            RaceCategory::Asian => self.asian,
            RaceCategory::PacificIslander => self.pacific_islander,
            RaceCategory::Other => self.other,
            RaceCategory::Multiracial => self.multiracial,
            RaceCategory::Hispanic => self.hispanic,
        }
    }
}

/// The window during which daylight saving time is in effect for one year.
///
/// Membership is half-open: `start <= t < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DstInterval {
    pub year: i32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DstInterval {
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }
}

/// DST intervals keyed by calendar year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DstTable {
    intervals: BTreeMap<i32, DstInterval>,
}

impl DstTable {
    /// Builds the table. A later interval for the same year replaces an
    /// earlier one.
    #[must_use]
    pub fn new(intervals: impl IntoIterator<Item = DstInterval>) -> Self {
        Self {
            intervals: intervals.into_iter().map(|i| (i.year, i)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, year: i32) -> Option<&DstInterval> {
        self.intervals.get(&year)
    }

    pub fn intervals(&self) -> impl Iterator<Item = &DstInterval> {
        self.intervals.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

/// Dates on which the moon is full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullMoonCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl FullMoonCalendar {
    #[must_use]
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_full_moon(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
