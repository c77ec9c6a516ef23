//! Location field decoding.
//!
//! Source exports serialize the location column as a Python-style mapping
//! with single-quoted keys and string values, e.g.
//! `{'latitude': '34.0454', 'human_address': '{"address": ""}', 'longitude': '-118.3157'}`.
//! That is not valid JSON, so the mapping is split into its top-level
//! `key: value` entries by hand and each entry is matched with a regex.
//! Quoted values and nested brackets are never split or searched, so a
//! `latitude` inside `human_address` is ignored.

use std::sync::LazyLock;

use civic_stats_geography_models::GeoPoint;
use regex::Regex;

use crate::GeoError;

/// Matches one `key: value` entry with optional single/double quotes
/// around the key.
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)^\s*['"]?([A-Za-z_][A-Za-z0-9_]*)['"]?\s*:\s*(.*?)\s*$"#)
        .expect("valid regex")
});

/// Decodes a serialized location mapping into a [`GeoPoint`].
///
/// Only top-level keys are considered. Keys other than `latitude` and
/// `longitude` are ignored, and the first occurrence of a key wins.
///
/// # Errors
///
/// Returns [`GeoError::MalformedLocation`] if either key is absent or its
/// value is not a finite floating-point number.
pub fn decode_location(raw: &str) -> Result<GeoPoint, GeoError> {
    let mut latitude = None;
    let mut longitude = None;

    for entry in top_level_entries(raw) {
        let Some(caps) = ENTRY_RE.captures(entry) else {
            continue;
        };
        let (_, [key, value]) = caps.extract();
        match key {
            "latitude" if latitude.is_none() => latitude = Some(value),
            "longitude" if longitude.is_none() => longitude = Some(value),
            _ => {}
        }
    }

    let latitude = parse_coordinate(raw, latitude, "latitude")?;
    let longitude = parse_coordinate(raw, longitude, "longitude")?;
    Ok(GeoPoint::new(latitude, longitude))
}

/// Splits the body of a mapping on commas that are outside quotes and
/// nested brackets.
fn top_level_entries(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix('{')
        .and_then(|b| b.strip_suffix('}'))
        .unwrap_or(trimmed);

    let mut entries = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&body[start..]);

    entries
}

fn parse_coordinate(raw: &str, value: Option<&str>, key: &str) -> Result<f64, GeoError> {
    let value = value
        .ok_or_else(|| malformed(raw, format!("missing key '{key}'")))?
        .trim_matches(|c: char| c == '\'' || c == '"')
        .trim();

    let parsed = value
        .parse::<f64>()
        .map_err(|e| malformed(raw, format!("invalid {key} '{value}': {e}")))?;

    if !parsed.is_finite() {
        return Err(malformed(raw, format!("non-finite {key} '{value}'")));
    }

    Ok(parsed)
}

fn malformed(raw: &str, reason: String) -> GeoError {
    GeoError::MalformedLocation {
        input: raw.to_owned(),
        reason,
    }
}
