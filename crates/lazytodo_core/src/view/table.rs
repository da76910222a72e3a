//! Editable task table (output collaborator).
//!
//! # Responsibility
//! - Project active tasks into rows with a derived display status.
//! - Track in-place editing, selection and paging, and translate user
//!   actions into store requests.
//!
//! # Invariants
//! - At most one row is in edit mode at a time.
//! - Every selection change produces a full mark-complete request.
//! - Changing page cancels any edit in progress.

use crate::model::task::{non_blank, parse_deadline, Task, TaskId, TaskPatch};
use crate::store::request::{IdSelection, TaskRequest};
use crate::view::form::{deadline_error, FieldError, FormError, FormField, TaskDraft};
use crate::view::status::DisplayStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: DisplayStatus,
}

impl TaskRow {
    pub fn from_task(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            deadline: task.deadline,
            status: DisplayStatus::derive(task, now),
        }
    }
}

/// Rows for `tasks`, in the same order.
pub fn table_rows(tasks: &[Task], now: DateTime<Utc>) -> Vec<TaskRow> {
    tasks
        .iter()
        .map(|task| TaskRow::from_task(task, now))
        .collect()
}

/// Row editor failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEditError {
    /// Another row is already in edit mode.
    AlreadyEditing(TaskId),
    /// Save or cancel was requested with no row in edit mode.
    NotEditing,
    /// The row to edit is not an active task.
    UnknownTask(TaskId),
    /// Row fields failed validation; the row stays in edit mode.
    Invalid(FormError),
}

impl Display for RowEditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyEditing(id) => write!(f, "row {id} is already being edited"),
            Self::NotEditing => write!(f, "no row is being edited"),
            Self::UnknownTask(id) => write!(f, "task not found: {id}"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RowEditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormError> for RowEditError {
    fn from(value: FormError) -> Self {
        Self::Invalid(value)
    }
}

/// Interaction state of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTable {
    editing: Option<TaskId>,
    selection: Vec<TaskId>,
    page: usize,
}

impl TaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.editing == Some(id)
    }

    pub fn selection(&self) -> &[TaskId] {
        &self.selection
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Puts `task`'s row in edit mode and returns its prefilled draft.
    pub fn begin_edit(&mut self, task: &Task) -> Result<TaskDraft, RowEditError> {
        if let Some(current) = self.editing {
            return Err(RowEditError::AlreadyEditing(current));
        }
        self.editing = Some(task.id);
        Ok(TaskDraft::from_task(task))
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validates the row draft and returns the edit request.
    ///
    /// Every column is required in the row editor. On failure the row stays
    /// in edit mode.
    pub fn save_edit(&mut self, draft: &TaskDraft) -> Result<TaskRequest, RowEditError> {
        let id = self.editing.ok_or(RowEditError::NotEditing)?;
        let patch = validate_row(draft)?;
        self.editing = None;
        Ok(TaskRequest::Edit { id, patch })
    }

    pub fn delete(&mut self, id: TaskId) -> TaskRequest {
        if self.is_editing(id) {
            self.editing = None;
        }
        TaskRequest::Remove(id)
    }

    /// Replaces the selection and returns the recompute request for it.
    pub fn select(&mut self, ids: Vec<TaskId>) -> TaskRequest {
        self.selection = ids.clone();
        TaskRequest::MarkComplete(IdSelection::Many(ids))
    }

    pub fn change_page(&mut self, page: usize) {
        self.page = page;
        self.cancel_edit();
    }
}

fn required_message(field: FormField) -> String {
    format!("Please Input {}!", field.label())
}

/// Every column is required; title and description are stored trimmed.
fn validate_row(draft: &TaskDraft) -> Result<TaskPatch, FormError> {
    let mut errors = Vec::new();
    let mut require = |field: FormField, value: &str| {
        if value.trim().is_empty() {
            errors.push(FieldError {
                field,
                message: required_message(field),
            });
            false
        } else {
            true
        }
    };
    require(FormField::Title, &draft.title);
    require(FormField::Description, &draft.description);
    let has_deadline = require(FormField::Deadline, &draft.deadline);

    let deadline = if has_deadline {
        match parse_deadline(&draft.deadline) {
            Ok(deadline) => deadline,
            Err(err) => {
                errors.push(deadline_error(err));
                None
            }
        }
    } else {
        None
    };

    if !errors.is_empty() {
        return Err(FormError::new(errors));
    }

    Ok(TaskPatch::default()
        .title(draft.title.trim())
        .description(non_blank(&draft.description))
        .deadline(deadline))
}
