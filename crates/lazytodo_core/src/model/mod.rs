//! Domain model for todo tasks.
//!
//! # Responsibility
//! - Define the canonical task shape used by the store and all views.
//!
//! # Invariants
//! - Every task is identified by a store-assigned `TaskId`.
//! - Deletion is a soft move to trash, never a hard delete.

pub mod task;
