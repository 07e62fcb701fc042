//! Field validation for new student results.
//!
//! # Responsibility
//! - Turn raw, untyped form input into typed fields.
//! - Report every failing field in one pass.
//!
//! # Invariants
//! - The four fields are checked independently; one failing field never hides
//!   another.
//! - At most one error is reported per field: the first rule it breaks.
//! - Overall validity is the conjunction of all four field verdicts.

use crate::model::student_result::{StudentResult, MAX_SCORE};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ROLL_NO_MIN_CHARS: usize = 2;
const STUDENT_NAME_MIN_CHARS: usize = 3;
const MAX_AGE_YEARS: i32 = 120;
const DATE_FORMAT: &str = "%Y-%m-%d";

static STUDENT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid student name regex"));

/// Form fields accepted when adding a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    RollNo,
    StudentName,
    DateOfBirth,
    Score,
}

impl Field {
    /// Form field name used by presentation layers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RollNo => "rollNo",
            Self::StudentName => "studentName",
            Self::DateOfBirth => "dateOfBirth",
            Self::Score => "score",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule broken by a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Required,
    TooShort,
    Duplicate,
    InvalidFormat,
    NotInPast,
    ImplausibleAge,
    OutOfRange,
    NotInteger,
}

/// One field-level validation failure with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self {
            field,
            kind,
            message: default_message(field, kind).to_string(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All failing fields of one submission, keyed by field in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the error recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Returns the rule broken by `field`, if any.
    pub fn kind(&self, field: Field) -> Option<FieldErrorKind> {
        self.get(field).map(|error| error.kind)
    }

    /// Iterates errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.values()
    }

    fn reject(&mut self, field: Field, kind: FieldErrorKind) {
        self.0
            .entry(field)
            .or_insert_with(|| FieldError::new(field, kind));
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid result input: {joined}")
    }
}

impl Error for FieldErrors {}

/// Raw form values exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResultInput {
    pub roll_no: String,
    pub student_name: String,
    pub date_of_birth: String,
    pub score: String,
}

impl RawResultInput {
    pub fn new(
        roll_no: impl Into<String>,
        student_name: impl Into<String>,
        date_of_birth: impl Into<String>,
        score: impl Into<String>,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            student_name: student_name.into(),
            date_of_birth: date_of_birth.into(),
            score: score.into(),
        }
    }
}

/// Typed fields produced by a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub roll_no: String,
    pub student_name: String,
    pub dob: NaiveDate,
    pub score: u8,
}

/// Validates raw input against the stored set and the current date.
///
/// # Errors
/// Returns every failing field at once; see [`FieldErrorKind`] for the rules.
pub fn validate(
    input: &RawResultInput,
    existing: &[StudentResult],
    today: NaiveDate,
) -> Result<ValidatedFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    let roll_no = check_roll_no(&input.roll_no, existing)
        .map_err(|kind| errors.reject(Field::RollNo, kind))
        .ok();
    let student_name = check_student_name(&input.student_name)
        .map_err(|kind| errors.reject(Field::StudentName, kind))
        .ok();
    let dob = check_date_of_birth(&input.date_of_birth, today)
        .map_err(|kind| errors.reject(Field::DateOfBirth, kind))
        .ok();
    let score = check_score(&input.score)
        .map_err(|kind| errors.reject(Field::Score, kind))
        .ok();

    match (roll_no, student_name, dob, score) {
        (Some(roll_no), Some(student_name), Some(dob), Some(score)) => {
            Ok(ValidatedFields {
                roll_no,
                student_name,
                dob,
                score,
            })
        }
        _ => Err(errors),
    }
}

fn check_roll_no(raw: &str, existing: &[StudentResult]) -> Result<String, FieldErrorKind> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldErrorKind::Required);
    }
    if value.chars().count() < ROLL_NO_MIN_CHARS {
        return Err(FieldErrorKind::TooShort);
    }
    if existing.iter().any(|record| record.same_roll_no(value)) {
        return Err(FieldErrorKind::Duplicate);
    }
    Ok(value.to_string())
}

fn check_student_name(raw: &str) -> Result<String, FieldErrorKind> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldErrorKind::Required);
    }
    if value.chars().count() < STUDENT_NAME_MIN_CHARS {
        return Err(FieldErrorKind::TooShort);
    }
    if !STUDENT_NAME_RE.is_match(value) {
        return Err(FieldErrorKind::InvalidFormat);
    }
    Ok(value.to_string())
}

fn check_date_of_birth(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldErrorKind> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldErrorKind::Required);
    }
    let dob = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| FieldErrorKind::Required)?;
    // The birth date starts at its midnight, which has passed once the day begins.
    if dob > today {
        return Err(FieldErrorKind::NotInPast);
    }
    if today.year() - dob.year() > MAX_AGE_YEARS {
        return Err(FieldErrorKind::ImplausibleAge);
    }
    Ok(dob)
}

fn check_score(raw: &str) -> Result<u8, FieldErrorKind> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldErrorKind::Required);
    }
    // Non-numeric text is reported as "not a whole number".
    let number = value
        .parse::<f64>()
        .map_err(|_| FieldErrorKind::NotInteger)?;
    if number < 0.0 || number > f64::from(MAX_SCORE) {
        return Err(FieldErrorKind::OutOfRange);
    }
    if !number.is_finite() || number.fract() != 0.0 {
        return Err(FieldErrorKind::NotInteger);
    }
    Ok(number as u8)
}

fn default_message(field: Field, kind: FieldErrorKind) -> &'static str {
    use FieldErrorKind::*;
    match (field, kind) {
        (Field::RollNo, Required) => "Roll No. is required",
        (Field::RollNo, TooShort) => "Roll No. must be at least 2 characters",
        (Field::RollNo, Duplicate) => "This Roll No. already exists",
        (Field::StudentName, Required) => "Student Name is required",
        (Field::StudentName, TooShort) => "Student Name must be at least 3 characters",
        (Field::StudentName, InvalidFormat) => "Student Name can only contain letters and spaces",
        (Field::DateOfBirth, Required) => "Date of Birth is required",
        (Field::DateOfBirth, NotInPast) => "Date of Birth must be in the past",
        (Field::DateOfBirth, ImplausibleAge) => "Please enter a valid Date of Birth",
        (Field::Score, Required) => "Score is required",
        (Field::Score, OutOfRange) => "Score must be between 0 and 100",
        (Field::Score, NotInteger) => "Score must be a whole number",
        _ => "Invalid value",
    }
}
