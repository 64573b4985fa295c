//! SQLite-backed review item store.
//!
//! Reference implementation of the [`ItemStore`] seam. Timestamps are
//! stored as RFC 3339 strings; the compare-and-swap token for schedule
//! updates is the stored `updated_at` value.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::error::{RecallError, RecallResult};
use crate::traits::ItemStore;
use crate::types::{ItemStatus, ReviewItem};

/// SQLite-backed store for review items.
pub struct SqliteItemStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteItemStore {
    /// Create a store with the given database path.
    ///
    /// Creates the database file and schema if it doesn't exist.
    pub fn new<P: AsRef<Path>>(path: P) -> RecallResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> RecallResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> RecallResult<()> {
        let conn = self.conn.lock().map_err(|e| RecallError::database(e.to_string()))?;

        conn.execute_batch(
            "
            -- Review items with their SM-2 scheduling state
            CREATE TABLE IF NOT EXISTS review_items (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                interval_days INTEGER NOT NULL DEFAULT 1,
                ease_factor REAL NOT NULL DEFAULT 2.5,
                repetitions INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'new',
                next_review_at TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_review_items_owner_due
                ON review_items(owner_id, next_review_at);
            CREATE INDEX IF NOT EXISTS idx_review_items_status
                ON review_items(status);
            ",
        )?;

        Ok(())
    }

    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<ReviewItem> {
        let status_str: String = row.get(5)?;
        let next_review_at: String = row.get(6)?;
        let created_at: String = row.get(7)?;
        let updated_at: String = row.get(8)?;

        Ok(ReviewItem {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            interval_days: row.get(2)?,
            ease_factor: row.get(3)?,
            repetitions: row.get(4)?,
            status: ItemStatus::from_str(&status_str).unwrap_or(ItemStatus::New),
            next_review_at: parse_timestamp(&next_review_at),
            created_at: parse_timestamp(&created_at),
            updated_at: parse_timestamp(&updated_at),
        })
    }
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl ItemStore for SqliteItemStore {
    fn insert(&self, item: &ReviewItem) -> RecallResult<()> {
        let conn = self.conn.lock().map_err(|e| RecallError::database(e.to_string()))?;

        conn.execute(
            "INSERT INTO review_items
             (id, owner_id, interval_days, ease_factor, repetitions, status,
              next_review_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                item.id,
                item.owner_id,
                item.interval_days,
                item.ease_factor,
                item.repetitions,
                item.status.to_string(),
                item.next_review_at.to_rfc3339(),
                item.created_at.to_rfc3339(),
                item.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get(&self, owner_id: &str, item_id: &str) -> RecallResult<ReviewItem> {
        let conn = self.conn.lock().map_err(|e| RecallError::database(e.to_string()))?;

        let item = conn
            .query_row(
                "SELECT id, owner_id, interval_days, ease_factor, repetitions, status,
                        next_review_at, created_at, updated_at
                 FROM review_items WHERE id = ?1",
                params![item_id],
                Self::row_to_item,
            )
            .optional()?
            .ok_or_else(|| RecallError::not_found(item_id))?;

        if item.owner_id != owner_id {
            return Err(RecallError::ownership(item_id, owner_id));
        }

        Ok(item)
    }

    fn due_items(&self, owner_id: &str, now: DateTime<Utc>) -> RecallResult<Vec<ReviewItem>> {
        let conn = self.conn.lock().map_err(|e| RecallError::database(e.to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT id, owner_id, interval_days, ease_factor, repetitions, status,
                    next_review_at, created_at, updated_at
             FROM review_items
             WHERE owner_id = ?1 AND next_review_at <= ?2
             ORDER BY next_review_at ASC, id ASC",
        )?;

        let items = stmt
            .query_map(params![owner_id, now.to_rfc3339()], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    fn update_schedule(
        &self,
        item: &ReviewItem,
        expected_updated_at: Option<DateTime<Utc>>,
    ) -> RecallResult<()> {
        let conn = self.conn.lock().map_err(|e| RecallError::database(e.to_string()))?;

        let updated = match expected_updated_at {
            Some(expected) => conn.execute(
                "UPDATE review_items
                 SET interval_days = ?1, ease_factor = ?2, repetitions = ?3,
                     status = ?4, next_review_at = ?5, updated_at = ?6
                 WHERE id = ?7 AND owner_id = ?8 AND updated_at = ?9",
                params![
                    item.interval_days,
                    item.ease_factor,
                    item.repetitions,
                    item.status.to_string(),
                    item.next_review_at.to_rfc3339(),
                    item.updated_at.to_rfc3339(),
                    item.id,
                    item.owner_id,
                    expected.to_rfc3339(),
                ],
            )?,
            None => conn.execute(
                "UPDATE review_items
                 SET interval_days = ?1, ease_factor = ?2, repetitions = ?3,
                     status = ?4, next_review_at = ?5, updated_at = ?6
                 WHERE id = ?7 AND owner_id = ?8",
                params![
                    item.interval_days,
                    item.ease_factor,
                    item.repetitions,
                    item.status.to_string(),
                    item.next_review_at.to_rfc3339(),
                    item.updated_at.to_rfc3339(),
                    item.id,
                    item.owner_id,
                ],
            )?,
        };

        if updated == 0 {
            // Distinguish a vanished row from a stale CAS token.
            let exists: bool = conn
                .query_row(
                    "SELECT 1 FROM review_items WHERE id = ?1 AND owner_id = ?2",
                    params![item.id, item.owner_id],
                    |_| Ok(true),
                )
                .optional()?
                .unwrap_or(false);

            return if exists {
                Err(RecallError::conflict(&item.id))
            } else {
                Err(RecallError::not_found(&item.id))
            };
        }

        Ok(())
    }

    fn count(&self, owner_id: &str) -> RecallResult<usize> {
        let conn = self.conn.lock().map_err(|e| RecallError::database(e.to_string()))?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM review_items WHERE owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }
}
