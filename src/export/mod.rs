//! Export sinks
//!
//! Writes the aggregated records to JSON, CSV, or SQLite. The sink is
//! resolved once at run start from a closed format enum; the orchestrator
//! invokes it at most once per run, and only with non-empty records.

mod csv_export;
mod json_export;
mod sqlite_export;

pub use csv_export::CsvExporter;
pub use json_export::JsonExporter;
pub use sqlite_export::SqliteExporter;

use crate::extract::Record;
use crate::ExportError;
use std::path::Path;

/// Known export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Sqlite,
}

impl ExportFormat {
    /// Resolves a format name from config
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

/// Export sink dispatch
pub enum Exporter {
    Json(JsonExporter),
    Csv(CsvExporter),
    Sqlite(SqliteExporter),
}

impl Exporter {
    /// Instantiates the sink for the given format
    pub fn new(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json(JsonExporter),
            ExportFormat::Csv => Self::Csv(CsvExporter),
            ExportFormat::Sqlite => Self::Sqlite(SqliteExporter::default()),
        }
    }

    /// Writes all records to the destination path
    pub fn export(&self, records: &[Record], destination: &str) -> Result<(), ExportError> {
        ensure_parent_dir(Path::new(destination))?;
        match self {
            Self::Json(exporter) => exporter.export(records, destination),
            Self::Csv(exporter) => exporter.export(records, destination),
            Self::Sqlite(exporter) => exporter.export(records, destination),
        }
    }
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
