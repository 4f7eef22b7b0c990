//! Task list domain model.
//!
//! # Responsibility
//! - Define the record shape shared by both store backends and the mirror.
//! - Own description validation used at the mirror boundary.
//!
//! # Invariants
//! - Records are never edited in place; they are created and removed whole.

pub mod record;
