//! Persistence adapters for the student result set.
//!
//! # Responsibility
//! - Define the whole-set `PersistenceAdapter` contract.
//! - Provide memory, JSON file and SQLite key/value backends.
//!
//! # Invariants
//! - Every backend shares one JSON encoding of the record set.
//! - Reads degrade to an empty set instead of failing the caller.

pub mod json_file;
pub mod persistence;
pub mod sqlite_kv;
