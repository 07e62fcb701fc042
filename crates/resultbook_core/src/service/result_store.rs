//! Student result use-case service.
//!
//! # Responsibility
//! - Own the canonical record set through a `PersistenceAdapter`.
//! - Validate, create, list, delete and clear results.
//! - Compute aggregate statistics over a record slice.
//!
//! # Invariants
//! - `add` validates against the freshly loaded set and never persists a
//!   rejected submission.
//! - New ids are strictly greater than every stored id and every id this
//!   store has handed out before.
//! - `list` sorts a copy; the stored order is never rewritten by reads.
//! - `delete` of an unknown id is a silent no-op.
//! - Writes read through `try_load`; an unreadable payload fails the write
//!   instead of being overwritten.

use crate::clock::{Clock, SystemClock};
use crate::model::student_result::{ResultId, StudentResult};
use crate::model::validation::{validate, FieldErrors, RawResultInput, ValidatedFields};
use crate::repo::persistence::{PersistenceAdapter, PersistenceError};
use crate::service::collation::locale_compare;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by result store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Submission rejected; carries every failing field.
    Validation(FieldErrors),
    /// Backend failed to read, write or clear the set.
    Persistence(PersistenceError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "{errors}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<FieldErrors> for StoreError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Aggregate statistics over a set of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    pub count: usize,
    /// Mean score rounded to two decimal places, half away from zero.
    pub average: f64,
    pub max: u8,
    pub min: u8,
}

/// Computes statistics; all zero for an empty slice.
///
/// The average is rounded on the binary `f64` value (`mean * 100` rounded
/// half away from zero). A decimal formatter working on the exact expansion
/// can land 0.01 apart when `mean * 100` is not exactly representable near a
/// `.5` tie. Display code formats the stored value with `{:.2}` and does not
/// round again.
pub fn stats(records: &[StudentResult]) -> Stats {
    let (Some(max), Some(min)) = (
        records.iter().map(|r| r.score).max(),
        records.iter().map(|r| r.score).min(),
    ) else {
        return Stats::default();
    };

    let total: u64 = records.iter().map(|r| u64::from(r.score)).sum();
    let mean = total as f64 / records.len() as f64;

    Stats {
        count: records.len(),
        average: (mean * 100.0).round() / 100.0,
        max,
        min,
    }
}

/// Facade over the record set and its persistence adapter.
pub struct ResultStore<P: PersistenceAdapter, C: Clock = SystemClock> {
    adapter: P,
    clock: C,
    last_issued_id: ResultId,
}

impl<P: PersistenceAdapter> ResultStore<P> {
    /// Creates a store on the wall clock.
    pub fn new(adapter: P) -> Self {
        Self::with_clock(adapter, SystemClock)
    }
}

impl<P: PersistenceAdapter, C: Clock> ResultStore<P, C> {
    /// Creates a store with an explicit time source.
    pub fn with_clock(adapter: P, clock: C) -> Self {
        Self {
            adapter,
            clock,
            last_issued_id: 0,
        }
    }

    pub fn adapter(&self) -> &P {
        &self.adapter
    }

    /// Validates input against the stored set without persisting anything.
    pub fn validate(&self, input: &RawResultInput) -> Result<ValidatedFields, FieldErrors> {
        let existing = self.adapter.load();
        validate(input, &existing, self.clock.today())
    }

    /// Validates and appends a new result.
    ///
    /// # Errors
    /// - `StoreError::Validation` with every failing field; nothing is written.
    /// - `StoreError::Persistence` when the stored set cannot be read or saved.
    pub fn add(&mut self, input: &RawResultInput) -> StoreResult<StudentResult> {
        let started_at = Instant::now();
        let mut records = self.load_for_write("result_add")?;

        let fields = match validate(input, &records, self.clock.today()) {
            Ok(fields) => fields,
            Err(errors) => {
                let rejected = errors
                    .iter()
                    .map(|e| e.field.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                info!(
                    "event=result_add module=service status=rejected fields={rejected} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Err(errors.into());
            }
        };

        let record = StudentResult {
            id: self.next_id(&records),
            roll_no: fields.roll_no,
            student_name: fields.student_name,
            dob: fields.dob,
            score: fields.score,
        };
        records.push(record.clone());

        if let Err(err) = self.adapter.save(&records) {
            warn!(
                "event=result_add module=service status=error backend={} error_code=save_failed error={err}",
                self.adapter.backend()
            );
            return Err(err.into());
        }

        info!(
            "event=result_add module=service status=ok id={} count={} duration_ms={}",
            record.id,
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(record)
    }

    /// Returns every stored result sorted by roll number.
    pub fn list(&self) -> Vec<StudentResult> {
        let mut records = self.adapter.load();
        records.sort_by(|a, b| locale_compare(&a.roll_no, &b.roll_no));
        records
    }

    /// Removes the result with `id`; unknown ids are ignored.
    ///
    /// # Errors
    /// Returns `StoreError::Persistence` when the stored set cannot be read or
    /// saved.
    pub fn delete(&mut self, id: ResultId) -> StoreResult<()> {
        let mut records = self.load_for_write("result_delete")?;
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            info!("event=result_delete module=service status=noop id={id}");
            return Ok(());
        }

        self.adapter.save(&records)?;
        info!(
            "event=result_delete module=service status=ok id={id} count={}",
            records.len()
        );
        Ok(())
    }

    /// Removes every stored result. Irreversible.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        self.adapter.clear()?;
        info!(
            "event=result_clear module=service status=ok backend={}",
            self.adapter.backend()
        );
        Ok(())
    }

    /// Statistics over the currently stored set.
    pub fn stats(&self) -> Stats {
        stats(&self.adapter.load())
    }

    fn load_for_write(&self, event: &str) -> StoreResult<Vec<StudentResult>> {
        self.adapter.try_load().map_err(|err| {
            warn!(
                "event={event} module=service status=error backend={} error_code=load_failed error={err}",
                self.adapter.backend()
            );
            err.into()
        })
    }

    fn next_id(&mut self, records: &[StudentResult]) -> ResultId {
        let stored_max = records.iter().map(|r| r.id).max().unwrap_or(0);
        let id = self
            .clock
            .now_millis()
            .max(stored_max.saturating_add(1))
            .max(self.last_issued_id.saturating_add(1));
        self.last_issued_id = id;
        id
    }
}
