//! Per-zip average annual rates.

use std::collections::BTreeMap;

/// Average number of records per year for each zip.
///
/// Rows are grouped by `(zip, year)` and counted; each zip's rate is the
/// sum of its yearly counts divided by the number of distinct years it
/// appears in. Zips with only partial coverage are therefore not penalized
/// for the years they are missing.
#[must_use]
pub fn rate_per_zip_per_year<'a, I>(rows: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut counts: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();

    for (zip, year) in rows {
        *counts.entry(zip).or_default().entry(year).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(zip, years)| {
            let total: u64 = years.values().sum();
            #[allow(clippy::cast_precision_loss)]
            let rate = total as f64 / years.len() as f64;
            (zip.to_string(), rate)
        })
        .collect()
}
