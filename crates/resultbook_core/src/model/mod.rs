//! Domain model for student results.
//!
//! # Responsibility
//! - Define the canonical `StudentResult` record and its wire shape.
//! - Validate raw form input before a record is constructed.
//! - Derive grade letters and display tiers from scores.
//!
//! # Invariants
//! - Every stored record passed validation at creation.
//! - Records are never edited in place; lifecycle is create, read, delete.

pub mod classify;
pub mod student_result;
pub mod validation;
