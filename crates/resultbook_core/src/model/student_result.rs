//! Student result domain model.
//!
//! # Responsibility
//! - Define the canonical record stored by `ResultStore`.
//! - Fix the persisted wire shape (`id`, `rollNo`, `studentName`, `dob`, `score`).
//!
//! # Invariants
//! - `id` is unique within a stored set and never reassigned.
//! - `score` stays within `0..=MAX_SCORE`.
//! - `roll_no` is unique case-insensitively across a stored set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier assigned when a record is created.
///
/// Epoch milliseconds at creation, bumped when needed to stay unique.
pub type ResultId = i64;

/// Highest score a record can carry.
pub const MAX_SCORE: u8 = 100;

/// One student's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResult {
    /// Stable identifier, immutable after creation.
    pub id: ResultId,
    /// Roll number as entered (trimmed).
    pub roll_no: String,
    /// Student display name (trimmed).
    pub student_name: String,
    /// Date of birth, serialized as `YYYY-MM-DD`.
    pub dob: NaiveDate,
    /// Whole-number score.
    pub score: u8,
}

/// Persisted record rejected by structural checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIntegrityError {
    ScoreOutOfRange { id: ResultId, score: u8 },
    EmptyRollNo(ResultId),
}

impl Display for RecordIntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScoreOutOfRange { id, score } => {
                write!(f, "record {id} has score {score} outside 0..={MAX_SCORE}")
            }
            Self::EmptyRollNo(id) => write!(f, "record {id} has an empty roll number"),
        }
    }
}

impl Error for RecordIntegrityError {}

impl StudentResult {
    /// Returns whether `other` is the same roll number ignoring case.
    pub fn same_roll_no(&self, other: &str) -> bool {
        self.roll_no.to_lowercase() == other.to_lowercase()
    }

    /// Checks the invariants every persisted record must satisfy.
    ///
    /// Date rules depend on "today" and are only enforced at creation.
    pub fn check_integrity(&self) -> Result<(), RecordIntegrityError> {
        if self.score > MAX_SCORE {
            return Err(RecordIntegrityError::ScoreOutOfRange {
                id: self.id,
                score: self.score,
            });
        }
        if self.roll_no.trim().is_empty() {
            return Err(RecordIntegrityError::EmptyRollNo(self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordIntegrityError, StudentResult};
    use chrono::NaiveDate;

    fn record(score: u8) -> StudentResult {
        StudentResult {
            id: 1,
            roll_no: "A1".to_string(),
            student_name: "Jane Doe".to_string(),
            dob: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            score,
        }
    }

    #[test]
    fn same_roll_no_ignores_case() {
        let result = record(50);
        assert!(result.same_roll_no("a1"));
        assert!(!result.same_roll_no("a2"));
    }

    #[test]
    fn integrity_rejects_score_above_max() {
        let err = record(101).check_integrity().unwrap_err();
        assert_eq!(
            err,
            RecordIntegrityError::ScoreOutOfRange { id: 1, score: 101 }
        );
        assert!(record(100).check_integrity().is_ok());
    }
}
