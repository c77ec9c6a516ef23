//! Arrest rate for one charge group against one race share, per zip.

use std::collections::BTreeMap;

use civic_stats_analytics_models::{RaceVsArrestParams, RaceVsArrestRow};
use civic_stats_dataset_models::{ArrestRecord, RaceRecord};

use crate::AnalyticsError;
use crate::rates::rate_per_zip_per_year;

/// Joins the per-zip arrest rate for `params.charge_group` against the
/// race breakdown.
///
/// Arrests without a resolved zip are ignored. Zips missing from either
/// side are dropped. Rows are ordered by zip.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidParameter`] if the charge group is
/// blank.
pub fn race_vs_arrest(
    arrests: &[ArrestRecord],
    race: &[RaceRecord],
    params: &RaceVsArrestParams,
) -> Result<Vec<RaceVsArrestRow>, AnalyticsError> {
    let charge_group = params.charge_group.trim();
    if charge_group.is_empty() {
        return Err(AnalyticsError::InvalidParameter {
            message: "charge group must not be empty".to_string(),
        });
    }

    let matching = arrests
        .iter()
        .filter(|a| a.charge_group_description.eq_ignore_ascii_case(charge_group))
        .filter_map(|a| Some((a.zip.as_deref()?, a.year.as_str())));
    let rates = rate_per_zip_per_year(matching);

    if rates.is_empty() {
        log::warn!("No zip-resolved arrests found for charge group '{charge_group}'");
    }

    let population: BTreeMap<&str, &RaceRecord> =
        race.iter().map(|r| (r.zip.as_str(), r)).collect();

    let rows: Vec<RaceVsArrestRow> = rates
        .into_iter()
        .filter_map(|(zip, arrests_per_year)| {
            let record = population.get(zip.as_str())?;
            if record.total_population == 0 {
                return None;
            }

            #[allow(clippy::cast_precision_loss)]
            let total = record.total_population as f64;
            #[allow(clippy::cast_precision_loss)]
            let race_population = record.population(params.race) as f64;

            Some(RaceVsArrestRow {
                race: params.race,
                race_percent: race_population / total * 100.0,
                total_population: record.total_population,
                arrests_per_year,
                arrests_per_100k: arrests_per_year / total * 100_000.0,
                zip,
            })
        })
        .collect();

    log::info!(
        "Built race-vs-arrest rows for {} zips ({charge_group}, {})",
        rows.len(),
        params.race
    );

    Ok(rows)
}
