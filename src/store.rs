//! SQLite persistence for extracted applications.

use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::record::Application;

/// Idempotent store for scraped records.
///
/// The application number is the natural key; re-running the scraper
/// over an unchanged register inserts nothing. Duplicates are skipped
/// silently, never treated as errors.
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open(path: &Path) -> Result<Self> {
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Opens an in-memory database, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Creates the `data` table when it does not exist yet.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS data (
                council_reference TEXT PRIMARY KEY,
                address TEXT NOT NULL,
                date_received TEXT NOT NULL,
                reason TEXT NOT NULL,
                date_scraped TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Inserts a record unless its key is already present.
    ///
    /// Returns whether a row was actually written.
    pub fn insert_if_absent(&self, app: &Application) -> Result<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO data
                (council_reference, address, date_received, reason, date_scraped)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                app.council_reference,
                app.address,
                app.date_received,
                app.reason,
                app.date_scraped.format("%Y-%m-%d").to_string(),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM data", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn app(reference: &str) -> Application {
        Application {
            council_reference: reference.to_string(),
            address: "123 Smith St".to_string(),
            date_received: "2018-07-03".to_string(),
            reason: "Dwelling".to_string(),
            date_scraped: NaiveDate::from_ymd_opt(2018, 7, 14).unwrap(),
        }
    }

    #[test]
    fn insert_then_count() {
        let store = RecordStore::open_in_memory().unwrap();
        assert!(store.insert_if_absent(&app("17/67")).unwrap());
        assert!(store.insert_if_absent(&app("17/68")).unwrap());
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn duplicate_keys_are_silently_skipped() {
        let store = RecordStore::open_in_memory().unwrap();
        assert!(store.insert_if_absent(&app("17/67")).unwrap());
        // Same key, different payload: first write wins, no error.
        let mut changed = app("17/67");
        changed.address = "elsewhere".to_string();
        assert!(!store.insert_if_absent(&changed).unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let store = RecordStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.sqlite");
        {
            let store = RecordStore::open(&path).unwrap();
            store.insert_if_absent(&app("17/67")).unwrap();
        }
        let reopened = RecordStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }
}
