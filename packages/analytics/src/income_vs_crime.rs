//! Crime rate per capita against median income, per zip.

use std::collections::BTreeMap;

use civic_stats_analytics_models::IncomeVsCrimeRow;
use civic_stats_dataset_models::{CrimeRecord, IncomeRecord, RaceRecord};

use crate::rates::rate_per_zip_per_year;

/// Joins the per-zip crime rate with population (from the race table) and
/// then with income.
///
/// Crimes without a resolved zip are ignored. A zip appears in the output
/// only if it has crimes, population, and income. Rows are ordered by zip.
#[must_use]
pub fn income_vs_crime(
    crimes: &[CrimeRecord],
    race: &[RaceRecord],
    income: &[IncomeRecord],
) -> Vec<IncomeVsCrimeRow> {
    let rates = rate_per_zip_per_year(
        crimes
            .iter()
            .filter_map(|c| Some((c.zip.as_deref()?, c.year.as_str()))),
    );

    let population: BTreeMap<&str, u64> = race
        .iter()
        .map(|r| (r.zip.as_str(), r.total_population))
        .collect();
    let income: BTreeMap<&str, i64> = income.iter().map(|i| (i.zip.as_str(), i.amount)).collect();

    let rows: Vec<IncomeVsCrimeRow> = rates
        .into_iter()
        .filter_map(|(zip, crimes_per_year)| {
            let total_population = *population.get(zip.as_str()).filter(|p| **p > 0)?;
            let income = *income.get(zip.as_str())?;

            #[allow(clippy::cast_precision_loss)]
            let crime_rate_per_1k = crimes_per_year / total_population as f64 * 1000.0;

            Some(IncomeVsCrimeRow {
                zip,
                income,
                total_population,
                crimes_per_year,
                crime_rate_per_1k,
            })
        })
        .collect();

    log::info!("Built income-vs-crime rows for {} zips", rows.len());

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crime(zip: &str, year: &str) -> CrimeRecord {
        CrimeRecord {
            dr_number: "1".to_string(),
            date_occurred: format!("{year}-06-01T00:00:00"),
            year: year.to_string(),
            crime_date: format!("{year}-06-01"),
            crime_code: "510".to_string(),
            crime_description: "VEHICLE - STOLEN".to_string(),
            location: String::new(),
            zip: Some(zip.to_string()),
        }
    }

    fn population(zip: &str, total: u64) -> RaceRecord {
        RaceRecord {
            zip: zip.to_string(),
            total_population: total,
            white: total,
            black: 0,
            american_indian: 0,
            asian: 0,
            pacific_islander: 0,
            other: 0,
            multiracial: 0,
            hispanic: 0,
        }
    }

    fn income(zip: &str, amount: i64) -> IncomeRecord {
        IncomeRecord {
            zip: zip.to_string(),
            amount,
        }
    }

    #[test]
    fn computes_rate_per_thousand() {
        let crimes: Vec<CrimeRecord> = (0..30)
            .map(|i| crime("90001", if i < 20 { "2018" } else { "2019" }))
            .collect();
        let rows = income_vs_crime(
            &crimes,
            &[population("90001", 5_000)],
            &[income("90001", 40_000)],
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].income, 40_000);
        assert!((rows[0].crimes_per_year - 15.0).abs() < 1e-9);
        assert!((rows[0].crime_rate_per_1k - 3.0).abs() < 1e-9);
    }

    #[test]
    fn drops_zips_missing_population_or_income() {
        let crimes = vec![
            crime("90001", "2019"),
            crime("90002", "2019"),
            crime("90003", "2019"),
        ];
        let rows = income_vs_crime(
            &crimes,
            &[population("90001", 2_000), population("90002", 3_000)],
            &[income("90002", 50_000), income("90003", 60_000)],
        );

        let zips: Vec<&str> = rows.iter().map(|r| r.zip.as_str()).collect();
        assert_eq!(zips, ["90002"]);
    }
}
