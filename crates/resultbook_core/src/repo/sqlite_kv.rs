//! SQLite key/value persistence backend.
//!
//! # Responsibility
//! - Store the encoded record set as one row of `kv_store`.
//! - Reuse the shared connection bootstrap and migrations.
//!
//! # Invariants
//! - The record set lives under `STORAGE_KEY`; no other rows are touched.
//! - `save` is a single upsert statement, so it replaces the set atomically.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::student_result::StudentResult;
use crate::repo::persistence::{
    decode_records, encode_records, PersistenceAdapter, PersistenceResult, STORAGE_KEY,
};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed adapter owning its connection.
pub struct SqlitePersistence {
    conn: Connection,
}

impl SqlitePersistence {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a migrated in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Raw stored payload, `None` when nothing is stored.
    pub fn payload(&self) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()
    }

    /// Overwrites the raw stored payload without encoding checks.
    pub fn put_payload(&self, payload: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![STORAGE_KEY, payload],
        )?;
        Ok(())
    }
}

impl PersistenceAdapter for SqlitePersistence {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn try_load(&self) -> PersistenceResult<Vec<StudentResult>> {
        let payload = self.payload()?;
        decode_records(payload.as_deref(), self.backend())
    }

    fn save(&mut self, records: &[StudentResult]) -> PersistenceResult<()> {
        let payload = encode_records(records)?;
        self.put_payload(&payload)?;
        debug!(
            "event=records_save module=repo status=ok backend=sqlite count={}",
            records.len()
        );
        Ok(())
    }

    fn clear(&mut self) -> PersistenceResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [STORAGE_KEY])?;
        Ok(())
    }
}
