//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by the store and every view.
//! - Define the add payload (`NewTask`) and the partial edit (`TaskPatch`).
//! - Provide lifecycle helpers for soft-delete (trash) semantics.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `removed` is the source of truth for trash state and is never cleared.
//! - `overdue` is informational; the store reads it but never writes it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned task identifier.
pub type TaskId = u64;

/// Wire/input format for task deadlines.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned once by the store at creation time.
    pub id: TaskId,
    /// Expected non-empty; enforced by input collaborators, not the store.
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    /// Stored flag consulted by mark-complete. Never recomputed by the store.
    #[serde(default)]
    pub overdue: bool,
    /// Soft delete tombstone. `true` for every task in the trash sequence.
    #[serde(default)]
    pub removed: bool,
}

impl Task {
    /// Builds a task from an add payload and a freshly assigned id.
    pub fn from_new(id: TaskId, new_task: NewTask) -> Self {
        Self {
            id,
            title: new_task.title,
            description: new_task.description,
            deadline: new_task.deadline,
            completed: new_task.completed && !new_task.overdue,
            overdue: new_task.overdue,
            removed: new_task.removed,
        }
    }

    /// Marks this task as moved to trash.
    pub fn soft_delete(&mut self) {
        self.removed = true;
    }

    /// Returns whether this task belongs in the active sequence.
    pub fn is_active(&self) -> bool {
        !self.removed
    }
}

/// Payload for the add operation.
///
/// Flags default to `false`; callers may override them, matching the add
/// contract where `completed`, `overdue` and `removed` are optional inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub overdue: bool,
    #[serde(default)]
    pub removed: bool,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_overdue(mut self, overdue: bool) -> Self {
        self.overdue = overdue;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Partial update for the edit operation.
///
/// `None` leaves a field untouched. For the optional fields, `Some(None)`
/// clears the value. `id` and `removed` are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub deadline: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
    pub overdue: Option<bool>,
}

impl TaskPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn deadline(mut self, deadline: Option<NaiveDate>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn overdue(mut self, overdue: bool) -> Self {
        self.overdue = Some(overdue);
        self
    }

    /// Returns whether this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.completed.is_none()
            && self.overdue.is_none()
    }

    /// Writes the specified fields into `task`.
    ///
    /// An overdue task never ends up completed, whatever the patch says.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(overdue) = self.overdue {
            task.overdue = overdue;
        }
        task.completed = task.completed && !task.overdue;
    }
}

/// Field-level validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Deadline text is not a `YYYY-MM-DD` calendar date.
    InvalidDeadline(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be blank"),
            Self::InvalidDeadline(value) => {
                write!(f, "deadline `{value}` is not a valid YYYY-MM-DD date")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Trims a title and rejects it when nothing is left.
pub fn normalize_title(value: &str) -> Result<String, TaskValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Parses deadline input text. Blank input means "no deadline".
pub fn parse_deadline(value: &str) -> Result<Option<NaiveDate>, TaskValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DEADLINE_FORMAT)
        .map(Some)
        .map_err(|_| TaskValidationError::InvalidDeadline(trimmed.to_string()))
}

/// Formats a deadline the same way it is accepted as input.
pub fn format_deadline(deadline: NaiveDate) -> String {
    deadline.format(DEADLINE_FORMAT).to_string()
}

/// Maps blank optional text to `None`.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
