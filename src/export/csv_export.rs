//! CSV file exporter

use crate::extract::Record;
use crate::ExportError;

/// Writes records as CSV with a header row
///
/// Columns come from the first record's field names; records are uniform
/// because the extractor fills missing fields with empty strings.
pub struct CsvExporter;

impl CsvExporter {
    pub fn export(&self, records: &[Record], destination: &str) -> Result<(), ExportError> {
        let Some(first) = records.first() else {
            std::fs::write(destination, "")?;
            return Ok(());
        };

        let columns: Vec<&String> = first.keys().collect();
        let mut writer = csv::Writer::from_path(destination)?;
        writer.write_record(&columns)?;
        for record in records {
            let row: Vec<&str> = columns
                .iter()
                .map(|column| record.get(*column).map(String::as_str).unwrap_or(""))
                .collect();
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![
            Record::from([
                ("price".to_string(), "9.99".to_string()),
                ("title".to_string(), "One".to_string()),
            ]),
            Record::from([
                ("price".to_string(), "19.99".to_string()),
                ("title".to_string(), "Two".to_string()),
            ]),
        ];

        CsvExporter.export(&records, path.to_str().unwrap()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), ["price", "title"]);
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "9.99");
        assert_eq!(&rows[1][1], "Two");
    }

    #[test]
    fn test_export_empty_records_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        CsvExporter.export(&[], path.to_str().unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_missing_field_exported_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gaps.csv");
        let records = vec![
            Record::from([
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ]),
            Record::from([("a".to_string(), "3".to_string())]),
        ];

        CsvExporter.export(&records, path.to_str().unwrap()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(&rows[1][1], "");
    }
}
