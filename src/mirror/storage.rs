//! SQLite storage for the local mirror
//!
//! Holds water logs and the daily goal for use without an account.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

use crate::client::models::WaterLog;
use crate::error::StoreError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

/// Database file name inside the data directory
const DB_FILE: &str = "mirror.db";

type Result<T> = std::result::Result<T, StoreError>;

/// Raw `water_logs` row before timestamp conversion
type LogRow = (String, String, i64, i64, Option<String>);

/// SQLite-backed storage for offline water tracking
pub struct MirrorStorage {
    conn: Connection,
}

impl MirrorStorage {
    /// Open or create storage at the default data location
    pub fn open() -> Result<Self> {
        let data_dir = Self::data_dir()?;
        Self::open_at(&data_dir)
    }

    /// Get the data directory path (~/.local/share/hydrate on Linux)
    pub fn data_dir() -> Result<PathBuf> {
        let data_base = dirs::data_dir().ok_or(StoreError::NoHome)?;
        Ok(data_base.join("hydrate"))
    }

    /// Open storage in a specific directory (for testing)
    pub fn open_at(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .map_err(|e| StoreError::Io(format!("Failed to create data dir: {}", e)))?;

        let db_path = data_dir.join(DB_FILE);
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Local data schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            Self::nuke(&db_path)?;
            return Self::open_at(data_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS water_logs (
                id TEXT PRIMARY KEY NOT NULL,
                user_id TEXT NOT NULL,
                ts_micros INTEGER NOT NULL,
                amount INTEGER NOT NULL,
                notes TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_water_logs_ts ON water_logs(ts_micros);

            CREATE TABLE IF NOT EXISTS goal (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                goal_amount INTEGER NOT NULL,
                updated_micros INTEGER NOT NULL
            );
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn })
    }

    /// Store a log
    pub fn insert_log(&self, log: &WaterLog) -> Result<()> {
        self.conn.execute(
            "INSERT INTO water_logs (id, user_id, ts_micros, amount, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                log.id,
                log.user_id,
                log.timestamp.timestamp_micros(),
                log.amount,
                log.notes
            ],
        )?;
        Ok(())
    }

    /// Logs whose UTC day falls in `[start, end]`, oldest first
    pub fn logs_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<WaterLog>> {
        let from = day_start_micros(start);
        let until = end
            .checked_add_days(Days::new(1))
            .map(day_start_micros)
            .unwrap_or(i64::MAX);

        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, ts_micros, amount, notes FROM water_logs
             WHERE ts_micros >= ?1 AND ts_micros < ?2
             ORDER BY ts_micros, id",
        )?;
        let rows = stmt
            .query_map(params![from, until], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<LogRow>, _>>()?;

        rows.into_iter().map(log_from_row).collect()
    }

    /// Distinct UTC days with at least one log, oldest first
    pub fn logged_days(&self) -> Result<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT date(ts_micros / 1000000, 'unixepoch') AS day
             FROM water_logs ORDER BY day",
        )?;
        let days = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        days.into_iter()
            .map(|day| {
                day.parse::<NaiveDate>()
                    .map_err(|e| StoreError::Corrupt(format!("log date {}: {}", day, e)))
            })
            .collect()
    }

    /// Number of stored logs
    pub fn log_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM water_logs", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// Stored goal and when it was set
    pub fn goal(&self) -> Result<Option<(u32, DateTime<Utc>)>> {
        let row: Option<(i64, i64)> = self
            .conn
            .query_row(
                "SELECT goal_amount, updated_micros FROM goal WHERE id = 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;

        row.map(|(amount, updated)| Ok((to_amount(amount)?, to_timestamp(updated)?)))
            .transpose()
    }

    /// Replace the goal
    pub fn set_goal(&self, goal_amount: u32, updated_at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO goal (id, goal_amount, updated_micros) VALUES (1, ?1, ?2)",
            params![goal_amount, updated_at.timestamp_micros()],
        )?;
        Ok(())
    }

    /// Delete all logs and the goal
    pub fn clear_all(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM water_logs", [])?;
        self.conn.execute("DELETE FROM goal", [])?;
        Ok(removed)
    }

    /// Nuke the database file
    fn nuke(db_path: &Path) -> Result<()> {
        if db_path.exists() {
            std::fs::remove_file(db_path)
                .map_err(|e| StoreError::Io(format!("Failed to remove local data: {}", e)))?;
        }
        Ok(())
    }
}

fn day_start_micros(day: NaiveDate) -> i64 {
    day.and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .timestamp_micros()
}

fn to_timestamp(micros: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| StoreError::Corrupt(format!("timestamp {}", micros)))
}

fn to_amount(amount: i64) -> Result<u32> {
    u32::try_from(amount).map_err(|_| StoreError::Corrupt(format!("amount {}", amount)))
}

fn log_from_row((id, user_id, ts, amount, notes): LogRow) -> Result<WaterLog> {
    Ok(WaterLog {
        id,
        user_id,
        timestamp: to_timestamp(ts)?,
        amount: to_amount(amount)?,
        notes,
    })
}
