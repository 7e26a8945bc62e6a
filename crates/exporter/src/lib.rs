//! # Tally Exporter
//!
//! CSV export of a chart's data points, plus the matching reader used by the
//! command-line `analyze` command.

pub mod csv_export;
pub mod error;

pub use csv_export::{export_filename, import_observations, CsvExporter};
pub use error::ExportError;
