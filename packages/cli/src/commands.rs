//! Subcommand implementations.

use std::path::PathBuf;

use chrono::NaiveDate;
use civic_stats_analytics::daily::{dst_vs_crime, full_moon_vs_crime};
use civic_stats_analytics::income_vs_crime::income_vs_crime;
use civic_stats_analytics::race_vs_arrest::race_vs_arrest;
use civic_stats_analytics_models::{DailyRateReport, RaceVsArrestParams};
use civic_stats_cli_utils::{IndicatifProgress, MultiProgress};
use civic_stats_dataset_models::{ArrestRecord, CrimeRecord, DstInterval};
use civic_stats_datasets::arrest::load_arrests;
use civic_stats_datasets::crime::load_crimes;
use civic_stats_datasets::dst::load_dst;
use civic_stats_datasets::full_moon::load_full_moons;
use civic_stats_datasets::income::load_income;
use civic_stats_datasets::race::load_race;
use civic_stats_geography::reference::load_zip_table;
use civic_stats_geography::resolver::resolve;
use civic_stats_geography_models::GeoPoint;
use serde::Serialize;

use crate::CliError;
use crate::config::{Config, OutputFormat};
use crate::output::{open_sink, write_metric, write_rows};
use crate::zips::{Located, attach_zips};

/// Which dataset `clean` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CleanTarget {
    Arrests,
    Crimes,
    Income,
    Race,
    Dst,
    FullMoon,
}

/// Resolved settings shared by every subcommand.
pub struct Context<'a> {
    pub config: Config,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub multi: &'a MultiProgress,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedZip<'a> {
    latitude: f64,
    longitude: f64,
    zip: &'a str,
}

#[derive(Serialize)]
struct FullMoonRow {
    date: NaiveDate,
}

impl Context<'_> {
    fn write_rows<T: Serialize>(&self, rows: &[T]) -> Result<(), CliError> {
        write_rows(rows, self.format, open_sink(self.output.as_deref())?)
    }

    fn with_zips<T: Located>(&self, records: Vec<T>) -> Result<Vec<T>, CliError> {
        let table = load_zip_table(self.config.datasets.zip_centroids()?)?;
        let progress = IndicatifProgress::rows_bar(self.multi, "Resolving zips");
        attach_zips(
            records,
            &table,
            self.config.resolver.skip_malformed,
            &*progress,
        )
    }

    fn arrests_with_zips(&self) -> Result<Vec<ArrestRecord>, CliError> {
        self.with_zips(load_arrests(self.config.datasets.arrests()?)?)
    }

    fn crimes_with_zips(&self) -> Result<Vec<CrimeRecord>, CliError> {
        self.with_zips(load_crimes(self.config.datasets.crimes()?)?)
    }

    fn write_daily(&self, title: &str, report: &DailyRateReport) -> Result<(), CliError> {
        if report.skipped_days > 0 {
            log::info!("{title}: {} days left out", report.skipped_days);
        }
        write_metric(
            title,
            &report.rows,
            self.format,
            open_sink(self.output.as_deref())?,
        )
    }
}

/// Prints the zip whose centroid is nearest to `(lat, lon)`.
///
/// # Errors
///
/// Fails if the zip table is not configured, cannot be loaded, or is empty.
pub fn resolve_point(ctx: &Context<'_>, lat: f64, lon: f64) -> Result<(), CliError> {
    let table = load_zip_table(ctx.config.datasets.zip_centroids()?)?;
    let zip = resolve(&GeoPoint::new(lat, lon), &table)?;
    ctx.write_rows(&[ResolvedZip {
        latitude: lat,
        longitude: lon,
        zip,
    }])
}

/// Writes one cleaned dataset.
///
/// # Errors
///
/// Fails if the dataset is not configured, does not clean, or zip
/// resolution aborts.
pub fn clean(ctx: &Context<'_>, target: CleanTarget, with_zips: bool) -> Result<(), CliError> {
    let paths = &ctx.config.datasets;
    if with_zips && !matches!(target, CleanTarget::Arrests | CleanTarget::Crimes) {
        log::warn!("--with-zips only applies to arrests and crimes; ignoring");
    }

    match target {
        CleanTarget::Arrests if with_zips => ctx.write_rows(&ctx.arrests_with_zips()?),
        CleanTarget::Arrests => ctx.write_rows(&load_arrests(paths.arrests()?)?),
        CleanTarget::Crimes if with_zips => ctx.write_rows(&ctx.crimes_with_zips()?),
        CleanTarget::Crimes => ctx.write_rows(&load_crimes(paths.crimes()?)?),
        CleanTarget::Income => ctx.write_rows(&load_income(paths.income()?)?),
        CleanTarget::Race => ctx.write_rows(&load_race(paths.race()?)?),
        CleanTarget::Dst => {
            let table = load_dst(paths.dst()?)?;
            let intervals: Vec<DstInterval> = table.intervals().copied().collect();
            ctx.write_rows(&intervals)
        }
        CleanTarget::FullMoon => {
            let calendar = load_full_moons(paths.full_moon()?)?;
            let rows: Vec<FullMoonRow> = calendar
                .dates()
                .map(|&date| FullMoonRow { date })
                .collect();
            ctx.write_rows(&rows)
        }
    }
}

/// Arrest rate for one charge group against one race share, per zip.
///
/// # Errors
///
/// Fails if a required dataset is missing or malformed, or the charge
/// group is blank.
pub fn race_vs_arrest_cmd(ctx: &Context<'_>, params: &RaceVsArrestParams) -> Result<(), CliError> {
    let race = load_race(ctx.config.datasets.race()?)?;
    let arrests = ctx.arrests_with_zips()?;
    let rows = race_vs_arrest(&arrests, &race, params)?;

    let title = format!(
        "{} arrests vs {} population",
        params.charge_group.trim(),
        params.race.label()
    );
    write_metric(
        &title,
        &rows,
        ctx.format,
        open_sink(ctx.output.as_deref())?,
    )
}

/// Crime rate per 1k residents against median income, per zip.
///
/// # Errors
///
/// Fails if a required dataset is missing or malformed.
pub fn income_vs_crime_cmd(ctx: &Context<'_>) -> Result<(), CliError> {
    let race = load_race(ctx.config.datasets.race()?)?;
    let income = load_income(ctx.config.datasets.income()?)?;
    let crimes = ctx.crimes_with_zips()?;
    let rows = income_vs_crime(&crimes, &race, &income);

    write_metric(
        "Median income vs crime rate",
        &rows,
        ctx.format,
        open_sink(ctx.output.as_deref())?,
    )
}

/// Average daily crime counts inside and outside DST.
///
/// # Errors
///
/// Fails if a required dataset is missing or malformed.
pub fn dst_vs_crime_cmd(ctx: &Context<'_>) -> Result<(), CliError> {
    let table = load_dst(ctx.config.datasets.dst()?)?;
    let crimes = load_crimes(ctx.config.datasets.crimes()?)?;
    let report = dst_vs_crime(&crimes, &table)?;
    ctx.write_daily("Crimes per day: DST vs standard time", &report)
}

/// Average daily crime counts on full-moon days against other days.
///
/// # Errors
///
/// Fails if a required dataset is missing or malformed.
pub fn full_moon_vs_crime_cmd(ctx: &Context<'_>) -> Result<(), CliError> {
    let calendar = load_full_moons(ctx.config.datasets.full_moon()?)?;
    let crimes = load_crimes(ctx.config.datasets.crimes()?)?;
    let report = full_moon_vs_crime(&crimes, &calendar);
    ctx.write_daily("Crimes per day: full moon vs other nights", &report)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::Path;

    use civic_stats_analytics_models::{Chart, IncomeVsCrimeRow};
    use serde::de::DeserializeOwned;
    use tempfile::TempDir;

    use super::*;
    use crate::config::DatasetPaths;

    const ZIPS: &str = "ZIP,LAT,LNG\n90029,34.089854,-118.29472\n90704,33.391655,-118.42436\n";

    const ARRESTS: &str = "Report ID,Arrest Date,Charge Group Code,Charge Group Description,Location\n\
        1,2019-03-09T00:00:00.000,16,Narcotic Drug Laws,\"{'latitude': '34.09', 'longitude': '-118.29'}\"\n\
        2,2019-03-10T00:00:00.000,16,Narcotic Drug Laws,\"{'latitude': '33.4', 'longitude': '-118.4'}\"\n\
        3,2019-03-11T00:00:00.000,16,Narcotic Drug Laws,not a location\n\
        4,2019-03-12T00:00:00.000,,,\"{'latitude': '34.09', 'longitude': '-118.29'}\"\n";

    const CRIMES: &str = "DR Number,Date Occurred,Crime Code,Crime Code Description,Location\n\
        11,2019-01-01T00:00:00,510,VEHICLE - STOLEN,\"{'latitude': '34.09', 'longitude': '-118.29'}\"\n\
        12,2019-02-01T00:00:00,510,VEHICLE - STOLEN,\"{'latitude': '34.08', 'longitude': '-118.30'}\"\n\
        13,2019-03-01T00:00:00,624,BATTERY - SIMPLE ASSAULT,\"{'latitude': '34.10', 'longitude': '-118.28'}\"\n\
        14,2019-04-01T00:00:00,624,BATTERY - SIMPLE ASSAULT,\"{'latitude': '33.4', 'longitude': '-118.4'}\"\n";

    const RACE: &str = "Zip Code,Total Population,White,Black,American Indian,Asian,Pacific Islander,Other,Multiracial,Hispanic\n\
        90029,5000,1000,500,0,1000,0,0,0,2500\n\
        90704,500,400,0,0,0,0,0,0,100\n";

    const INCOME: &str = "Zip Code\tEstimated Median Income\n90029\t$30,000\n90704\t$80,000\n";

    pub(crate) struct Fixture {
        dir: TempDir,
        config: Config,
    }

    /// Writes a small set of source exports around two zips to a temp dir.
    pub(crate) fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, contents: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, contents).unwrap();
            Some(path)
        };

        let config = Config {
            datasets: DatasetPaths {
                arrests: write("arrests.csv", ARRESTS),
                crimes: write("crimes.csv", CRIMES),
                income: write("income.tsv", INCOME),
                race: write("race.csv", RACE),
                zip_centroids: write("zips.csv", ZIPS),
                ..DatasetPaths::default()
            },
            ..Config::default()
        };

        Fixture { dir, config }
    }

    impl Fixture {
        fn output_path(&self) -> PathBuf {
            self.dir.path().join("out")
        }

        pub(crate) fn context<'a>(
            &self,
            multi: &'a MultiProgress,
            format: OutputFormat,
        ) -> Context<'a> {
            Context {
                config: self.config.clone(),
                format,
                output: Some(self.output_path()),
                multi,
            }
        }

        pub(crate) fn read_csv_output<T: DeserializeOwned>(&self) -> Vec<T> {
            read_csv(&self.output_path())
        }
    }

    fn read_csv<T: DeserializeOwned>(path: &Path) -> Vec<T> {
        csv::Reader::from_path(path)
            .unwrap()
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn clean_arrests_with_zips_skips_malformed_locations() {
        let fixture = fixture();
        let multi = MultiProgress::new();
        let ctx = fixture.context(&multi, OutputFormat::Csv);

        clean(&ctx, CleanTarget::Arrests, true).unwrap();

        let records: Vec<ArrestRecord> = fixture.read_csv_output();
        let resolved: Vec<(&str, Option<&str>)> = records
            .iter()
            .map(|r| (r.report_id.as_str(), r.zip.as_deref()))
            .collect();
        assert_eq!(resolved, [("1", Some("90029")), ("2", Some("90704"))]);
        assert_eq!(
            records[0].location,
            "{'latitude': '34.09', 'longitude': '-118.29'}"
        );
    }

    #[test]
    fn clean_arrests_with_zips_aborts_when_not_skipping() {
        let mut fixture = fixture();
        fixture.config.resolver.skip_malformed = false;
        let multi = MultiProgress::new();
        let ctx = fixture.context(&multi, OutputFormat::Csv);

        assert!(matches!(
            clean(&ctx, CleanTarget::Arrests, true),
            Err(CliError::MalformedRow { row: 3, .. })
        ));
    }

    #[test]
    fn clean_without_zips_leaves_zip_empty() {
        let fixture = fixture();
        let multi = MultiProgress::new();
        let ctx = fixture.context(&multi, OutputFormat::Csv);

        clean(&ctx, CleanTarget::Crimes, false).unwrap();

        let records: Vec<CrimeRecord> = fixture.read_csv_output();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.zip.is_none()));
        assert_eq!(records[0].crime_date, "2019-01-01");
    }

    #[test]
    fn income_vs_crime_writes_joined_rows() {
        let fixture = fixture();
        let multi = MultiProgress::new();
        let ctx = fixture.context(&multi, OutputFormat::Csv);

        income_vs_crime_cmd(&ctx).unwrap();

        let rows: Vec<IncomeVsCrimeRow> = fixture.read_csv_output();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].zip, "90029");
        assert_eq!(rows[0].income, 30_000);
        assert_eq!(rows[0].total_population, 5000);
        assert!((rows[0].crimes_per_year - 3.0).abs() < 1e-9);
        assert!((rows[0].crime_rate_per_1k - 0.6).abs() < 1e-9);
        assert_eq!(rows[1].zip, "90704");
        assert!((rows[1].crime_rate_per_1k - 2.0).abs() < 1e-9);
    }

    #[test]
    fn income_vs_crime_json_is_a_chart() {
        let fixture = fixture();
        let multi = MultiProgress::new();
        let ctx = fixture.context(&multi, OutputFormat::Json);

        income_vs_crime_cmd(&ctx).unwrap();

        let chart: Chart =
            serde_json::from_slice(&std::fs::read(fixture.output_path()).unwrap()).unwrap();
        assert_eq!(chart.title, "Median income vs crime rate");
        let points: Vec<(&str, &str)> = chart
            .points
            .iter()
            .map(|p| (p.category.as_str(), p.bucket.as_str()))
            .collect();
        assert_eq!(
            points,
            [
                ("Median income", "90029"),
                ("Crimes per 1k", "90029"),
                ("Median income", "90704"),
                ("Crimes per 1k", "90704"),
            ]
        );
    }

    #[test]
    fn missing_dataset_is_reported_by_key() {
        let fixture = fixture();
        let multi = MultiProgress::new();
        let ctx = fixture.context(&multi, OutputFormat::Csv);

        assert!(matches!(
            dst_vs_crime_cmd(&ctx),
            Err(CliError::MissingDataset { key: "dst" })
        ));
    }
}
