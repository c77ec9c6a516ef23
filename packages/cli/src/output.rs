//! Writes command results as CSV rows or pretty JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use civic_stats_analytics_models::{Chart, Series};
use serde::Serialize;

use crate::CliError;
use crate::config::OutputFormat;

/// Opens `path` for writing, or stdout when absent.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be created.
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>, CliError> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Writes a table of serializable rows.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn write_rows<T: Serialize, W: Write>(
    rows: &[T],
    format: OutputFormat,
    mut sink: W,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(sink);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut sink, rows)?;
            writeln!(sink)?;
            sink.flush()?;
        }
    }
    Ok(())
}

/// Writes metric rows. JSON output is a titled [`Chart`] of
/// `(category, bucket, value)` points, CSV output is the rows themselves.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn write_metric<T: Serialize + Series, W: Write>(
    title: &str,
    rows: &[T],
    format: OutputFormat,
    mut sink: W,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Csv => write_rows(rows, format, sink),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut sink, &Chart::from_rows(title, rows))?;
            writeln!(sink)?;
            sink.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use civic_stats_analytics_models::DailyRateRow;
    use civic_stats_dataset_models::IncomeRecord;

    use super::*;

    fn income() -> Vec<IncomeRecord> {
        vec![
            IncomeRecord {
                zip: "90001".to_string(),
                amount: 43_360,
            },
            IncomeRecord {
                zip: "90002".to_string(),
                amount: 37_285,
            },
        ]
    }

    #[test]
    fn csv_rows_have_headers() {
        let mut out = Vec::new();
        write_rows(&income(), OutputFormat::Csv, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "zip,amount\n90001,43360\n90002,37285\n"
        );
    }

    #[test]
    fn json_rows_are_an_array() {
        let mut out = Vec::new();
        write_rows(&income(), OutputFormat::Json, &mut out).unwrap();
        let parsed: Vec<IncomeRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, income());
    }

    #[test]
    fn json_metric_is_a_chart() {
        let rows = vec![DailyRateRow {
            year: "2014".to_string(),
            period: "DST".to_string(),
            days: 2,
            crimes: 6,
            crimes_per_day: 3.0,
        }];
        let mut out = Vec::new();
        write_metric("DST vs crime", &rows, OutputFormat::Json, &mut out).unwrap();

        let chart: Chart = serde_json::from_slice(&out).unwrap();
        assert_eq!(chart.title, "DST vs crime");
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].category, "DST");
        assert_eq!(chart.points[0].bucket, "2014");
    }
}
