//! JSON file exporter

use crate::extract::Record;
use crate::ExportError;

/// Writes records as a pretty-printed JSON array
pub struct JsonExporter;

impl JsonExporter {
    pub fn export(&self, records: &[Record], destination: &str) -> Result<(), ExportError> {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(destination, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_export_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let records = vec![
            Record::from([("title".to_string(), "One".to_string())]),
            Record::from([("title".to_string(), "Two".to_string())]),
        ];

        JsonExporter
            .export(&records, path.to_str().unwrap())
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<BTreeMap<String, String>> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_export_empty_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");

        JsonExporter.export(&[], path.to_str().unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "[]");
    }
}
