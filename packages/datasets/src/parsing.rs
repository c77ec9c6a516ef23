//! Shared parsing utilities for raw dataset fields.
//!
//! Date keys are derived by slicing the raw timestamp text, matching how
//! the exports format them (`2019-03-09T00:00:00.000`), so no timezone or
//! locale handling is involved.

use chrono::NaiveDate;

/// Date layouts seen in calendar-style exports, tried in order.
const CALENDAR_DATE_FORMATS: &[&str] = &["%B %d, %Y", "%d %B %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Returns the first `n` characters of `s`, or all of `s` if it is shorter.
#[must_use]
pub fn prefix(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or(s, |(i, _)| &s[..i])
}

/// Parses an integer column, accepting float-formatted whole numbers such
/// as `"12.0"`. Returns `None` for empty or non-integral values.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let f = value.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Parses a currency amount such as `"$52,806"`.
///
/// Returns `None` if the value does not start with `$` or is not a whole
/// number once the `$` and thousands separators are removed.
#[must_use]
pub fn parse_currency(value: &str) -> Option<i64> {
    let digits: String = value
        .trim()
        .strip_prefix('$')?
        .chars()
        .filter(|c| *c != ',')
        .collect();
    digits.trim().parse::<i64>().ok()
}

/// Parses a population count, allowing thousands separators. An empty
/// value counts as zero.
#[must_use]
pub fn parse_count(value: &str) -> Option<u64> {
    let digits: String = value.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse::<u64>().ok()
}

/// Parses a calendar date in any of the supported layouts.
#[must_use]
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    CALENDAR_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Parses a `YYYY-MM-DD` key as produced by the crime cleaner.
#[must_use]
pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_slices_by_characters() {
        assert_eq!(prefix("2019-03-09T00:00:00.000", 4), "2019");
        assert_eq!(prefix("2019-03-09T00:00:00.000", 10), "2019-03-09");
        assert_eq!(prefix("201", 4), "201");
        assert_eq!(prefix("", 4), "");
        assert_eq!(prefix("é2019", 2), "é2");
    }

    #[test]
    fn parses_integers_and_whole_floats() {
        assert_eq!(parse_integer("12"), Some(12));
        assert_eq!(parse_integer(" 24 "), Some(24));
        assert_eq!(parse_integer("12.0"), Some(12));
        assert_eq!(parse_integer("12.5"), None);
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("abc"), None);
    }

    #[test]
    fn parses_currency_with_separators() {
        assert_eq!(parse_currency("$1,234"), Some(1234));
        assert_eq!(parse_currency("$52,806"), Some(52_806));
        assert_eq!(parse_currency("$0"), Some(0));
    }

    #[test]
    fn rejects_currency_without_prefix() {
        assert_eq!(parse_currency("N/A"), None);
        assert_eq!(parse_currency("1,234"), None);
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency("$1,2x4"), None);
    }

    #[test]
    fn parses_counts() {
        assert_eq!(parse_count("1,500"), Some(1500));
        assert_eq!(parse_count(""), Some(0));
        assert_eq!(parse_count("-3"), None);
    }

    #[test]
    fn parses_calendar_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2014, 1, 16).unwrap();
        assert_eq!(parse_calendar_date("January 16, 2014"), Some(expected));
        assert_eq!(parse_calendar_date("16 January 2014"), Some(expected));
        assert_eq!(parse_calendar_date("2014-01-16"), Some(expected));
        assert_eq!(parse_calendar_date("01/16/2014"), Some(expected));
        assert_eq!(parse_calendar_date("someday"), None);
    }

    #[test]
    fn parses_date_keys() {
        assert_eq!(
            parse_date_key("2014-03-09"),
            NaiveDate::from_ymd_opt(2014, 3, 9)
        );
        assert_eq!(parse_date_key("2014-13-09"), None);
    }
}
