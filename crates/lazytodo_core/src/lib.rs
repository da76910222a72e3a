//! Core domain logic for LazyTodo.
//! This crate is the single source of truth for task lifecycle invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, IdPolicy, TodoConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{
    format_deadline, parse_deadline, NewTask, Task, TaskId, TaskPatch, TaskValidationError,
};
pub use service::todo_service::TodoService;
pub use store::request::{Applied, IdSelection, TaskRequest};
pub use store::task_store::{reduce, TaskStore};
pub use view::form::{FieldError, FormError, FormField, FormMode, TaskDraft, TaskForm};
pub use view::status::{BadgeTone, DisplayStatus};
pub use view::table::{table_rows, RowEditError, TaskRow, TaskTable};
pub use view::trash::{trash_entries, TrashEntry};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
