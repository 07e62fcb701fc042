//! Presentation-side state for the add form and the results table.
//!
//! # Responsibility
//! - Turn store output into display rows with derived grade/tier badges.
//! - Hold the single pending-delete selection between request and confirm.
//! - Map add attempts to the user-facing success/error messages.
//!
//! # Invariants
//! - The view never owns records; every render reloads through the store.
//! - `pending_delete` is cleared after a confirmed delete or a cancel.
//! - Text is returned unescaped; escaping belongs to the rendering surface.

use crate::clock::Clock;
use crate::model::classify::{grade, grade_tier, score_tier, Grade, Tier};
use crate::model::student_result::{ResultId, StudentResult};
use crate::model::validation::{FieldErrors, RawResultInput};
use crate::repo::persistence::PersistenceAdapter;
use crate::service::result_store::{stats, ResultStore, Stats, StoreError, StoreResult};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

pub const ADD_SUCCESS_MESSAGE: &str = "Student result added successfully!";
pub const FIX_ERRORS_BANNER: &str = "Please fix the errors above";
const DOB_DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub id: ResultId,
    pub roll_no: String,
    pub student_name: String,
    /// Date of birth as `dd/mm/yyyy`.
    pub dob_display: String,
    pub score: u8,
    pub score_tier: Tier,
    pub grade: Grade,
    pub grade_tier: Tier,
}

impl From<&StudentResult> for ResultRow {
    fn from(record: &StudentResult) -> Self {
        let letter = grade(record.score);
        Self {
            id: record.id,
            roll_no: record.roll_no.clone(),
            student_name: record.student_name.clone(),
            dob_display: format_dob(record.dob),
            score: record.score,
            score_tier: score_tier(record.score),
            grade: letter,
            grade_tier: grade_tier(letter),
        }
    }
}

/// Everything the results table needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsPage {
    /// Rows sorted by roll number.
    pub rows: Vec<ResultRow>,
    pub stats: Stats,
    /// True when the empty-state placeholder should be shown.
    pub is_empty: bool,
}

/// Outcome of submitting the add form.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added {
        record: StudentResult,
        message: &'static str,
    },
    Rejected {
        errors: FieldErrors,
        banner: &'static str,
    },
}

/// Formats a date of birth for the table.
pub fn format_dob(dob: NaiveDate) -> String {
    dob.format(DOB_DISPLAY_FORMAT).to_string()
}

/// Transient presentation state.
#[derive(Debug, Default)]
pub struct ResultsView {
    pending_delete: Option<ResultId>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the sorted rows plus statistics from the store.
    pub fn render<P: PersistenceAdapter, C: Clock>(
        &self,
        store: &ResultStore<P, C>,
    ) -> ResultsPage {
        let records = store.list();
        ResultsPage {
            rows: records.iter().map(ResultRow::from).collect(),
            stats: stats(&records),
            is_empty: records.is_empty(),
        }
    }

    /// Submits the add form.
    ///
    /// Validation failures become `AddOutcome::Rejected`; only persistence
    /// failures are returned as errors.
    pub fn submit<P: PersistenceAdapter, C: Clock>(
        &self,
        store: &mut ResultStore<P, C>,
        input: &RawResultInput,
    ) -> StoreResult<AddOutcome> {
        match store.add(input) {
            Ok(record) => Ok(AddOutcome::Added {
                record,
                message: ADD_SUCCESS_MESSAGE,
            }),
            Err(StoreError::Validation(errors)) => Ok(AddOutcome::Rejected {
                errors,
                banner: FIX_ERRORS_BANNER,
            }),
            Err(err) => Err(err),
        }
    }

    /// Selects a row for deletion, replacing any earlier selection.
    pub fn request_delete(&mut self, id: ResultId) {
        debug!("event=delete_request module=view status=pending id={id}");
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<ResultId> {
        self.pending_delete
    }

    /// Drops the pending selection without deleting.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the pending selection.
    ///
    /// Returns `false` when nothing was pending. The selection is kept if the
    /// store fails to save, so the user can retry.
    pub fn confirm_delete<P: PersistenceAdapter, C: Clock>(
        &mut self,
        store: &mut ResultStore<P, C>,
    ) -> StoreResult<bool> {
        let Some(id) = self.pending_delete else {
            return Ok(false);
        };
        store.delete(id)?;
        self.pending_delete = None;
        Ok(true)
    }

    /// Clears every result once the user has confirmed.
    pub fn clear_all<P: PersistenceAdapter, C: Clock>(
        &mut self,
        store: &mut ResultStore<P, C>,
        confirmed: bool,
    ) -> StoreResult<bool> {
        if !confirmed {
            return Ok(false);
        }
        store.clear_all()?;
        self.pending_delete = None;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_dob, ResultRow};
    use crate::model::classify::{Grade, Tier};
    use crate::model::student_result::StudentResult;
    use chrono::NaiveDate;

    #[test]
    fn dob_is_rendered_day_first() {
        let dob = NaiveDate::from_ymd_opt(2000, 3, 7).unwrap();
        assert_eq!(format_dob(dob), "07/03/2000");
    }

    #[test]
    fn row_carries_both_tier_bandings() {
        let record = StudentResult {
            id: 9,
            roll_no: "B2".to_string(),
            student_name: "John Roe".to_string(),
            dob: NaiveDate::from_ymd_opt(2001, 12, 31).unwrap(),
            score: 65,
        };
        let row = ResultRow::from(&record);
        assert_eq!(row.grade, Grade::D);
        assert_eq!(row.grade_tier, Tier::LowDistinct);
        assert_eq!(row.score_tier, Tier::Mid);
        assert_eq!(row.dob_display, "31/12/2001");
    }
}
