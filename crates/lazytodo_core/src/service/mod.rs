//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and view collaborators into use-case level APIs.
//! - Keep FFI/CLI front-ends decoupled from reducer details.

pub mod todo_service;
