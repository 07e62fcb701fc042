//! Core domain logic for resultbook, a student-results manager.
//! This crate is the single source of truth for result validation, grading
//! and persistence.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Backend, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::classify::{grade, grade_tier, score_tier, Grade, Tier};
pub use model::student_result::{ResultId, StudentResult, MAX_SCORE};
pub use model::validation::{
    validate, Field, FieldError, FieldErrorKind, FieldErrors, RawResultInput, ValidatedFields,
};
pub use repo::json_file::JsonFilePersistence;
pub use repo::persistence::{
    MemoryPersistence, PersistenceAdapter, PersistenceError, PersistenceResult, STORAGE_KEY,
};
pub use repo::sqlite_kv::SqlitePersistence;
pub use service::result_store::{stats, ResultStore, Stats, StoreError, StoreResult};
pub use view::{AddOutcome, ResultRow, ResultsPage, ResultsView};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
