//! Task Store: the single state container for active and trashed tasks.
//!
//! # Responsibility
//! - Model every mutation as a `TaskRequest` consumed by one reducer.
//! - Keep the store an explicit value owned by the caller, not a global.
//!
//! # Invariants
//! - Each request fully completes before the next one is observed.
//! - The store never returns errors; unknown ids are no-ops.

pub mod request;
pub mod task_store;
