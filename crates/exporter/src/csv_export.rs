use crate::error::ExportError;
use chrono::NaiveDate;
use core_types::validation::validate_measurement;
use core_types::DataPoint;
use csv::{ReaderBuilder, Writer};
use std::io::Read;

const DATE_FORMAT: &str = "%Y-%m-%d";
const HEADER: [&str; 3] = ["Date", "Measurement", "Label"];

/// Writes a chart's data points as CSV, oldest first.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, points: &[DataPoint]) -> Result<String, ExportError> {
        let mut sorted: Vec<&DataPoint> = points.iter().collect();
        sorted.sort_by_key(|p| p.date);

        let mut wtr = Writer::from_writer(vec![]);
        wtr.write_record(HEADER)?;

        for point in sorted {
            wtr.write_record([
                point.date.format(DATE_FORMAT).to_string(),
                point.measurement.to_string(),
                point.label.clone().unwrap_or_default(),
            ])?;
        }

        let data = wtr
            .into_inner()
            .map_err(|e| ExportError::Writer(e.to_string()))?;
        let csv = String::from_utf8(data)?;

        tracing::debug!(rows = points.len(), bytes = csv.len(), "Exported data points to CSV.");
        Ok(csv)
    }
}

/// The download filename for a chart's export, e.g. `morning-weight-data.csv`.
pub fn export_filename(chart_name: &str) -> String {
    let mut slug = String::with_capacity(chart_name.len());
    for c in chart_name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        "chart-data.csv".to_string()
    } else {
        format!("{slug}-data.csv")
    }
}

/// Reads `(date, measurement)` pairs back from a file in the export layout.
///
/// The `Label` column is optional. Rows with an unparsable date or a
/// non-finite measurement are rejected with their line number.
pub fn import_observations<R: Read>(reader: R) -> Result<Vec<(NaiveDate, f64)>, ExportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut observations = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let raw_date = record.get(0).unwrap_or_default();
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
            .map_err(|e| ExportError::InvalidRow(line, format!("bad date '{raw_date}': {e}")))?;

        let raw_value = record.get(1).unwrap_or_default();
        let value: f64 = raw_value.parse().map_err(|_| {
            ExportError::InvalidRow(line, format!("bad measurement '{raw_value}'"))
        })?;
        validate_measurement(value).map_err(|e| ExportError::InvalidRow(line, e.to_string()))?;

        observations.push((date, value));
    }

    Ok(observations)
}
