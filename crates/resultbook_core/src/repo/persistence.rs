//! Persistence adapter contract and in-memory implementation.
//!
//! # Responsibility
//! - Define whole-set load/save/clear over student results.
//! - Own the JSON encoding shared by every backend.
//!
//! # Invariants
//! - `load` never fails: absent, `null` or unreadable data yields an empty set.
//! - `try_load` fails only when the payload as a whole cannot be parsed, so
//!   write paths never save over data they could not read.
//! - Single records that fail to decode or `StudentResult::check_integrity`
//!   are skipped with a `warn` event; the rest of the set survives.
//! - `save` replaces the whole stored set.

use crate::model::student_result::StudentResult;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the record set is stored by key/value backends.
pub const STORAGE_KEY: &str = "studentResults";

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failure while writing or clearing the stored set.
#[derive(Debug)]
pub enum PersistenceError {
    Io(std::io::Error),
    Db(crate::db::DbError),
    Serialize(serde_json::Error),
    /// Stored payload is not a JSON array of records.
    Corrupt(String),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "record store io failed: {err}"),
            Self::Db(err) => write!(f, "record store database failed: {err}"),
            Self::Serialize(err) => write!(f, "failed to encode records: {err}"),
            Self::Corrupt(reason) => write!(f, "stored records are unreadable: {reason}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Corrupt(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<crate::db::DbError> for PersistenceError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(crate::db::DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Storage collaborator holding the full record set.
pub trait PersistenceAdapter {
    /// Short backend name used in log events.
    fn backend(&self) -> &'static str;

    /// Reads the stored set in storage order.
    ///
    /// # Errors
    /// - `PersistenceError::Corrupt` when the payload is not a record array.
    /// - `PersistenceError::Io`/`Db` when the backend cannot be read.
    fn try_load(&self) -> PersistenceResult<Vec<StudentResult>>;

    /// Returns the stored set in storage order; empty when absent or unreadable.
    fn load(&self) -> Vec<StudentResult> {
        self.try_load().unwrap_or_else(|err| {
            warn!(
                "event=records_load module=repo status=degraded backend={} error_code=unreadable error={err}",
                self.backend()
            );
            Vec::new()
        })
    }

    /// Overwrites the stored set.
    fn save(&mut self, records: &[StudentResult]) -> PersistenceResult<()>;
    /// Removes the stored set entirely.
    fn clear(&mut self) -> PersistenceResult<()>;
}

impl<P: PersistenceAdapter + ?Sized> PersistenceAdapter for Box<P> {
    fn backend(&self) -> &'static str {
        (**self).backend()
    }

    fn try_load(&self) -> PersistenceResult<Vec<StudentResult>> {
        (**self).try_load()
    }

    fn load(&self) -> Vec<StudentResult> {
        (**self).load()
    }

    fn save(&mut self, records: &[StudentResult]) -> PersistenceResult<()> {
        (**self).save(records)
    }

    fn clear(&mut self) -> PersistenceResult<()> {
        (**self).clear()
    }
}

/// Encodes a record set into the stored JSON payload.
pub fn encode_records(records: &[StudentResult]) -> PersistenceResult<String> {
    Ok(serde_json::to_string(records)?)
}

/// Decodes a stored payload.
///
/// `None` and `null` decode to an empty set. Elements that are not valid
/// records are skipped with a `warn` event.
///
/// # Errors
/// Returns `PersistenceError::Corrupt` when the payload is not a JSON array.
pub fn decode_records(
    payload: Option<&str>,
    backend: &str,
) -> PersistenceResult<Vec<StudentResult>> {
    let Some(payload) = payload else {
        return Ok(Vec::new());
    };

    let values = serde_json::from_str::<Option<Vec<serde_json::Value>>>(payload)
        .map_err(|err| PersistenceError::Corrupt(err.to_string()))?
        .unwrap_or_default();

    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let decoded = serde_json::from_value::<StudentResult>(value)
            .map_err(|err| err.to_string())
            .and_then(|record| {
                record
                    .check_integrity()
                    .map(|()| record)
                    .map_err(|err| err.to_string())
            });
        match decoded {
            Ok(record) => records.push(record),
            Err(err) => warn!(
                "event=records_load module=repo status=degraded backend={backend} error_code=invalid_record index={index} error={err}"
            ),
        }
    }
    Ok(records)
}

/// Process-local adapter that keeps the encoded payload in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    payload: Option<String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a raw stored payload, e.g. to replay corrupt data.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    /// Raw stored payload, `None` when nothing is stored.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl PersistenceAdapter for MemoryPersistence {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn try_load(&self) -> PersistenceResult<Vec<StudentResult>> {
        decode_records(self.payload.as_deref(), self.backend())
    }

    fn save(&mut self, records: &[StudentResult]) -> PersistenceResult<()> {
        self.payload = Some(encode_records(records)?);
        Ok(())
    }

    fn clear(&mut self) -> PersistenceResult<()> {
        self.payload = None;
        Ok(())
    }
}
