//! Catalog domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Define the closed genre set once, for validation and selection lists.
//!
//! # Invariants
//! - Every stored book is identified by a storage-assigned `BookId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod book;
pub mod genre;
