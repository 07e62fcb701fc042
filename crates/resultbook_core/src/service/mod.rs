//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and persistence into result use-cases.
//! - Keep presentation layers decoupled from storage details.

pub mod collation;
pub mod result_store;
