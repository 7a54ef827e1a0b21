use std::path::Path;

use chrono::NaiveDateTime;
use kidcon_types::{Result, Status, StatusCode, StoreCode};
use parking_lot::Mutex;
use rusqlite::{Connection, params};

/// One persisted counter sample.
///
/// Byte counts are floating point: router log values carry fractional
/// binary units (`4.5KiB`).
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSample {
    pub timestamp: NaiveDateTime,
    pub name: String,
    pub bytes_up: f64,
    pub bytes_down: f64,
}

/// SQLite-backed store of parsed counter samples, keyed by
/// `(timestamp, name)`. A repeated key updates the stored counters, so
/// re-ingesting a log backlog is harmless.
pub struct SampleStore {
    conn: Mutex<Connection>,
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS samples(
        timestamp  DATETIME,
        name       TEXT,
        bytes_up   NUMERIC,
        bytes_down NUMERIC,
        PRIMARY KEY(timestamp, name))
";

impl SampleStore {
    /// Open (or create) the database at `path` and ensure the schema.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            Status::with_message(
                StoreCode::OPEN_FAILED,
                format!("open {}: {}", path.display(), e),
            )
        })?;
        tracing::debug!(path = %path.display(), "opened sample store");
        Self::with_connection(conn)
    }

    /// In-memory database, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Status::with_message(StoreCode::OPEN_FAILED, e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])
            .map_err(|e| Status::with_message(StoreCode::SCHEMA_FAILED, e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a sample, replacing the counters of an existing
    /// `(timestamp, name)` row.
    pub fn upsert(&self, sample: &StoredSample) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO samples VALUES(datetime(?1), ?2, ?3, ?4)
             ON CONFLICT(timestamp, name) DO
             UPDATE SET bytes_up = ?3, bytes_down = ?4",
            params![
                sample.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
                sample.name,
                sample.bytes_up,
                sample.bytes_down,
            ],
        )
        .map_err(|e| {
            Status::with_message(
                StoreCode::UPSERT_FAILED,
                format!("upsert {}: {}", sample.name, e),
            )
        })?;
        Ok(())
    }

    /// All samples for a device, ordered by timestamp.
    pub fn rows_for(&self, name: &str) -> Result<Vec<StoredSample>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT timestamp, bytes_up, bytes_down
                 FROM samples WHERE name = ?1 ORDER BY 1",
            )
            .map_err(|e| Status::with_message(StoreCode::QUERY_FAILED, e.to_string()))?;

        let raw: Vec<(String, f64, f64)> = stmt
            .query_map(params![name], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .and_then(|rows| rows.collect())
            .map_err(|e| {
                Status::with_message(StoreCode::QUERY_FAILED, format!("query {}: {}", name, e))
            })?;

        raw.into_iter()
            .map(|(ts, bytes_up, bytes_down)| {
                let timestamp = NaiveDateTime::parse_from_str(&ts, "%Y-%m-%d %H:%M:%S")
                    .map_err(|e| {
                        Status::with_message(
                            StatusCode::INVALID_FORMAT,
                            format!("stored timestamp {:?}: {}", ts, e),
                        )
                    })?;
                Ok(StoredSample {
                    timestamp,
                    name: name.to_string(),
                    bytes_up,
                    bytes_down,
                })
            })
            .collect()
    }

    /// Number of stored samples across all devices.
    pub fn sample_count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM samples", [], |row| row.get(0))
            .map_err(|e| Status::with_message(StoreCode::QUERY_FAILED, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(ts: (u32, u32), name: &str, up: f64, down: f64) -> StoredSample {
        StoredSample {
            timestamp: NaiveDate::from_ymd_opt(2026, 8, 6)
                .unwrap()
                .and_hms_opt(ts.0, ts.1, 0)
                .unwrap(),
            name: name.to_string(),
            bytes_up: up,
            bytes_down: down,
        }
    }

    #[test]
    fn test_upsert_and_query() {
        let store = SampleStore::open_in_memory().unwrap();
        store.upsert(&sample((9, 0), "devA", 100.0, 250.0)).unwrap();

        let rows = store.rows_for("devA").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bytes_up, 100.0);
        assert_eq!(rows[0].bytes_down, 250.0);
    }

    #[test]
    fn test_upsert_replaces_on_duplicate_key() {
        let store = SampleStore::open_in_memory().unwrap();
        store.upsert(&sample((9, 0), "devA", 100.0, 250.0)).unwrap();
        store.upsert(&sample((9, 0), "devA", 150.0, 300.0)).unwrap();

        let rows = store.rows_for("devA").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bytes_up, 150.0);
        assert_eq!(rows[0].bytes_down, 300.0);
    }

    #[test]
    fn test_rows_are_timestamp_ordered() {
        let store = SampleStore::open_in_memory().unwrap();
        store.upsert(&sample((14, 0), "devA", 3.0, 3.0)).unwrap();
        store.upsert(&sample((9, 0), "devA", 1.0, 1.0)).unwrap();
        store.upsert(&sample((11, 30), "devA", 2.0, 2.0)).unwrap();

        let rows = store.rows_for("devA").unwrap();
        let ups: Vec<f64> = rows.iter().map(|r| r.bytes_up).collect();
        assert_eq!(ups, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_devices_are_isolated() {
        let store = SampleStore::open_in_memory().unwrap();
        store.upsert(&sample((9, 0), "devA", 1.0, 1.0)).unwrap();
        store.upsert(&sample((9, 0), "devB", 2.0, 2.0)).unwrap();

        assert_eq!(store.rows_for("devA").unwrap().len(), 1);
        assert_eq!(store.rows_for("devB").unwrap().len(), 1);
        assert!(store.rows_for("ghost-device").unwrap().is_empty());
        assert_eq!(store.sample_count().unwrap(), 2);
    }

    #[test]
    fn test_open_creates_database_file() {
        let dir = std::env::temp_dir().join("kidcon-test-store-open");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("samples.db");
        {
            let store = SampleStore::open(&path).unwrap();
            store.upsert(&sample((9, 0), "devA", 1.0, 2.0)).unwrap();
        }
        assert!(path.exists());

        // Reopen and read back.
        let store = SampleStore::open(&path).unwrap();
        assert_eq!(store.rows_for("devA").unwrap().len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
