//! Presentation-side collaborators of the task store.
//!
//! # Responsibility
//! - Input form validation, table projection/interaction, trash listing.
//! - Produce `TaskRequest`s; never mutate the store directly.
//!
//! Rendering is left to the front-end (Flutter via FFI, or the CLI).

pub mod form;
pub mod status;
pub mod table;
pub mod trash;
