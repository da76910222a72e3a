//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the todo session (form submit, table actions, trash listing) to
//!   Dart via FRB.
//! - Own the single process-wide `TodoService` the UI dispatches into.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every mutation is serialized through one mutex-guarded service.

use chrono::Utc;
use lazytodo_core::{
    core_version as core_version_inner, format_deadline, init_logging as init_logging_inner,
    ping as ping_inner, Applied, BadgeTone, FormMode, TaskForm, TodoConfig, TodoService,
};
use log::warn;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};

static SESSION: Lazy<Mutex<TodoService>> = Lazy::new(|| Mutex::new(new_session()));

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Result envelope for mutating calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// `false` only when input validation failed.
    pub ok: bool,
    /// Affected task id, when one exists.
    pub task_id: Option<u64>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl TodoActionResponse {
    fn from_applied(applied: Applied) -> Self {
        let (task_id, message) = match applied {
            Applied::Added(id) => (Some(id), "Task added.".to_string()),
            Applied::Edited(id) => (Some(id), "Task updated.".to_string()),
            Applied::Removed(id) => (Some(id), "Task moved to trash.".to_string()),
            Applied::CompletionRecomputed { completed } => {
                (None, format!("{completed} task(s) completed."))
            }
            Applied::Toggled { id, completed } => (
                Some(id),
                if completed {
                    "Task completed.".to_string()
                } else {
                    "Task reopened.".to_string()
                },
            ),
            Applied::Ignored(id) => (Some(id), "No active task with that id.".to_string()),
        };
        Self {
            ok: true,
            task_id,
            message,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// One table row as shown by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRowItem {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD`.
    pub deadline: Option<String>,
    /// `Pending|Overdue|Completed`.
    pub status: String,
    /// `default|error|success` badge class.
    pub tone: String,
}

/// One trash line as shown by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashItem {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<String>,
}

/// Adds a task from the entry form fields.
///
/// # FFI contract
/// - Blank title or malformed deadline returns `ok=false` and the store is
///   left unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(
    title: String,
    description: Option<String>,
    deadline: Option<String>,
) -> TodoActionResponse {
    submit(TaskForm::create(), title, description, deadline)
}

/// Replaces title, description and deadline of an active task.
///
/// Unknown ids are reported with `ok=true` and a no-op message.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_edit(
    id: u64,
    title: String,
    description: Option<String>,
    deadline: Option<String>,
) -> TodoActionResponse {
    let form = {
        let session = lock_session();
        match session.store().get(id) {
            Some(task) => TaskForm::edit(task),
            None => return TodoActionResponse::from_applied(Applied::Ignored(id)),
        }
    };
    submit(form, title, description, deadline)
}

/// Moves an active task to the trash.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_remove(id: u64) -> TodoActionResponse {
    TodoActionResponse::from_applied(lock_session().delete_row(id))
}

/// Sets the table selection; completion is recomputed for every active task.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_mark_complete(ids: Vec<u64>) -> TodoActionResponse {
    TodoActionResponse::from_applied(lock_session().change_selection(ids))
}

/// Flips completion of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(id: u64) -> TodoActionResponse {
    TodoActionResponse::from_applied(lock_session().toggle(id))
}

/// Active tasks with status derived against the current time.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list() -> Vec<TodoRowItem> {
    lock_session()
        .table_rows(Utc::now())
        .into_iter()
        .map(|row| TodoRowItem {
            id: row.id,
            title: row.title,
            description: row.description,
            deadline: row.deadline.map(format_deadline),
            status: row.status.label().to_string(),
            tone: tone_label(row.status.tone()).to_string(),
        })
        .collect()
}

/// Trashed tasks, oldest removal first.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_trash() -> Vec<TrashItem> {
    lock_session()
        .trash_entries()
        .into_iter()
        .map(|entry| TrashItem {
            id: entry.id,
            title: entry.title,
            description: entry.description,
            deadline: entry.deadline.map(format_deadline),
        })
        .collect()
}

/// Drops the session and starts a fresh one from current configuration.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_reset() {
    *lock_session() = new_session();
}

fn submit(
    mut form: TaskForm,
    title: String,
    description: Option<String>,
    deadline: Option<String>,
) -> TodoActionResponse {
    let draft = form.draft_mut();
    draft.title = title;
    draft.description = description.unwrap_or_default();
    draft.deadline = deadline.unwrap_or_default();

    let mode = form.mode();
    match lock_session().submit_form(&form) {
        Ok(applied) => TodoActionResponse::from_applied(applied),
        Err(err) => {
            let call = match mode {
                FormMode::Create => "todo_add",
                FormMode::Edit(_) => "todo_edit",
            };
            TodoActionResponse::failure(format!("{call} failed: {err}"))
        }
    }
}

fn new_session() -> TodoService {
    let config = TodoConfig::from_env().unwrap_or_else(|err| {
        warn!("event=config_load module=ffi status=fallback error={err}");
        TodoConfig::default()
    });
    TodoService::new(&config)
}

fn lock_session() -> MutexGuard<'static, TodoService> {
    SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn tone_label(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Default => "default",
        BadgeTone::Error => "error",
        BadgeTone::Success => "success",
    }
}
