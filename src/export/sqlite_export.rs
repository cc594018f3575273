//! SQLite database exporter

use crate::extract::Record;
use crate::ExportError;
use rusqlite::Connection;

/// Writes records into a single TEXT-column table
pub struct SqliteExporter {
    table_name: String,
}

impl SqliteExporter {
    pub fn new(table_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
        }
    }

    pub fn export(&self, records: &[Record], destination: &str) -> Result<(), ExportError> {
        let conn = Connection::open(destination)?;
        let Some(first) = records.first() else {
            return Ok(());
        };

        let columns: Vec<&String> = first.keys().collect();
        let column_defs = columns
            .iter()
            .map(|column| format!("\"{}\" TEXT", column))
            .collect::<Vec<_>>()
            .join(", ");
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
                self.table_name, column_defs
            ),
            [],
        )?;

        let column_list = columns
            .iter()
            .map(|column| format!("\"{}\"", column))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = columns
            .iter()
            .map(|_| "?")
            .collect::<Vec<_>>()
            .join(", ");
        let insert_sql = format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            self.table_name, column_list, placeholders
        );

        let mut statement = conn.prepare(&insert_sql)?;
        for record in records {
            let values: Vec<&str> = columns
                .iter()
                .map(|column| record.get(*column).map(String::as_str).unwrap_or(""))
                .collect();
            statement.execute(rusqlite::params_from_iter(values))?;
        }
        Ok(())
    }
}

impl Default for SqliteExporter {
    fn default() -> Self {
        Self::new("scraped_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_creates_table_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
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

        SqliteExporter::default()
            .export(&records, path.to_str().unwrap())
            .unwrap();

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM scraped_data", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let title: String = conn
            .query_row(
                "SELECT title FROM scraped_data WHERE price = '19.99'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(title, "Two");
    }

    #[test]
    fn test_export_empty_records_creates_database_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");

        SqliteExporter::default()
            .export(&[], path.to_str().unwrap())
            .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_custom_table_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.db");
        let records = vec![Record::from([("a".to_string(), "1".to_string())])];

        SqliteExporter::new("items")
            .export(&records, path.to_str().unwrap())
            .unwrap();

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
