//! Hint usage auditing.
//!
//! Every delivered hint leaves an audit record: which park, what text went
//! out, and whether the leak filter had to step in. Recording is advisory;
//! a failed write never blocks or fails the hint that triggered it.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One recorded hint delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintUsage {
    /// Display name of the park the hint was for.
    pub target_name: String,
    /// The sanitized text that went to the player.
    pub hint_text: String,
    /// Whether the fallback was substituted for a leak.
    pub redacted: bool,
    /// RFC 3339 timestamp of delivery.
    pub recorded_at: String,
}

impl HintUsage {
    /// Build a record stamped with the current time.
    pub fn now(target_name: &str, hint_text: &str, redacted: bool) -> Self {
        Self {
            target_name: target_name.to_string(),
            hint_text: hint_text.to_string(),
            redacted,
            recorded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Sink for hint usage records.
pub trait UsageRecorder: Send + Sync {
    fn record(&self, usage: &HintUsage) -> Result<(), UsageError>;
}

/// Usage log error types.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Lock error: {0}")]
    LockError(String),
}

/// SQLite-backed hint usage log.
///
/// Thread-safe wrapper around a SQLite connection; clones share the
/// underlying database.
#[derive(Clone)]
pub struct SqliteUsageLog {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUsageLog {
    /// Create a log backed by an in-memory database.
    pub fn new_in_memory() -> Result<Self, UsageError> {
        let conn = Connection::open_in_memory()?;
        let log = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        log.init_db()?;
        Ok(log)
    }

    /// Create a log backed by a database file.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, UsageError> {
        let conn = Connection::open(path)?;
        let log = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        log.init_db()?;
        Ok(log)
    }

    /// Initialize the database schema.
    fn init_db(&self) -> Result<(), UsageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| UsageError::LockError(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS hint_usage (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                target_name TEXT NOT NULL,
                hint_text TEXT NOT NULL,
                redacted INTEGER NOT NULL,
                recorded_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_hint_usage_target ON hint_usage(target_name)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_hint_usage_recorded_at ON hint_usage(recorded_at)",
            [],
        )?;

        Ok(())
    }

    /// The newest records, most recent first.
    pub fn recent(&self, limit: usize) -> Result<Vec<HintUsage>, UsageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| UsageError::LockError(e.to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT target_name, hint_text, redacted, recorded_at
             FROM hint_usage ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(HintUsage {
                target_name: row.get(0)?,
                hint_text: row.get(1)?,
                redacted: row.get::<_, i64>(2)? != 0,
                recorded_at: row.get(3)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Total records stored.
    pub fn count(&self) -> Result<usize, UsageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| UsageError::LockError(e.to_string()))?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM hint_usage", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Records where the filter substituted the fallback.
    pub fn count_redacted(&self) -> Result<usize, UsageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| UsageError::LockError(e.to_string()))?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM hint_usage WHERE redacted = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

impl UsageRecorder for SqliteUsageLog {
    fn record(&self, usage: &HintUsage) -> Result<(), UsageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| UsageError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO hint_usage (target_name, hint_text, redacted, recorded_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                usage.target_name,
                usage.hint_text,
                usage.redacted as i64,
                usage.recorded_at
            ],
        )?;

        Ok(())
    }
}

/// Recorder that drops every record, for hosts that do not audit hints.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullUsageRecorder;

impl UsageRecorder for NullUsageRecorder {
    fn record(&self, _usage: &HintUsage) -> Result<(), UsageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_usage(name: &str, redacted: bool) -> HintUsage {
        HintUsage::now(name, "Famous for sandstone formations.", redacted)
    }

    #[test]
    fn test_log_new_in_memory() {
        let log = SqliteUsageLog::new_in_memory();
        assert!(log.is_ok());
    }

    #[test]
    fn test_record_and_count() {
        let log = SqliteUsageLog::new_in_memory().unwrap();
        assert_eq!(log.count().unwrap(), 0);

        log.record(&create_test_usage("Arches National Park", false))
            .unwrap();
        log.record(&create_test_usage("Denali National Park", true))
            .unwrap();

        assert_eq!(log.count().unwrap(), 2);
        assert_eq!(log.count_redacted().unwrap(), 1);
    }

    #[test]
    fn test_recent_returns_newest_first() {
        let log = SqliteUsageLog::new_in_memory().unwrap();

        log.record(&create_test_usage("Arches National Park", false))
            .unwrap();
        log.record(&create_test_usage("Denali National Park", false))
            .unwrap();
        log.record(&create_test_usage("Yosemite National Park", true))
            .unwrap();

        let records = log.recent(2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].target_name, "Yosemite National Park");
        assert!(records[0].redacted);
        assert_eq!(records[1].target_name, "Denali National Park");
    }

    #[test]
    fn test_log_clone_shares_database() {
        let log1 = SqliteUsageLog::new_in_memory().unwrap();
        let log2 = log1.clone();

        log1.record(&create_test_usage("Glacier National Park", false))
            .unwrap();

        assert_eq!(log2.count().unwrap(), 1);
    }

    #[test]
    fn test_null_recorder_accepts_everything() {
        let recorder = NullUsageRecorder;
        recorder
            .record(&create_test_usage("Zion National Park", true))
            .unwrap();
    }

    #[test]
    fn test_usage_serialization_camel_case() {
        let usage = HintUsage {
            target_name: "Arches National Park".to_string(),
            hint_text: "Famous for sandstone formations.".to_string(),
            redacted: false,
            recorded_at: "2024-06-01T12:00:00+00:00".to_string(),
        };

        let json = serde_json::to_string(&usage).unwrap();
        assert!(json.contains("\"targetName\""));
        assert!(json.contains("\"hintText\""));
        assert!(json.contains("\"recordedAt\""));
    }
}
