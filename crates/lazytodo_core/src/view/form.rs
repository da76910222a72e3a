//! Task entry form (input collaborator).
//!
//! # Responsibility
//! - Hold raw draft text for title, description and deadline.
//! - Validate the draft and turn it into an add or edit request.
//!
//! # Invariants
//! - A draft that fails validation never produces a request.
//! - `title` is required; `description` and `deadline` are optional.

use crate::model::task::{
    format_deadline, non_blank, normalize_title, parse_deadline, NewTask, Task, TaskId,
    TaskPatch, TaskValidationError,
};
use crate::store::request::TaskRequest;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TITLE_REQUIRED_MESSAGE: &str = "Title is required";

/// Raw field text as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub deadline: String,
}

impl TaskDraft {
    /// Prefills a draft from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            deadline: task.deadline.map(format_deadline).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Deadline,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Deadline => "Deadline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// All field errors found in one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    errors: Vec<FieldError>,
}

impl FormError {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message reported for `field`, for inline display.
    pub fn message_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>();
        write!(f, "{}", messages.join("; "))
    }
}

impl Error for FormError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TaskId),
}

/// Create/edit form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    mode: FormMode,
    draft: TaskDraft,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::create()
    }
}

impl TaskForm {
    /// Empty form that submits an add request.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: TaskDraft::default(),
        }
    }

    /// Form prefilled from `task` that submits an edit request for it.
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            draft: TaskDraft::from_task(task),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.draft
    }

    /// Clears every field; the mode is kept.
    pub fn reset(&mut self) {
        self.draft = TaskDraft::default();
    }

    /// Validates the draft and builds the request for the current mode.
    ///
    /// Title and description are stored trimmed. In edit mode all three
    /// fields are written: blank optional fields clear the stored value.
    pub fn submit(&self) -> Result<TaskRequest, FormError> {
        let mut errors = Vec::new();

        let title = match normalize_title(&self.draft.title) {
            Ok(title) => Some(title),
            Err(_) => {
                errors.push(FieldError {
                    field: FormField::Title,
                    message: TITLE_REQUIRED_MESSAGE.to_string(),
                });
                None
            }
        };
        let deadline = match parse_deadline(&self.draft.deadline) {
            Ok(deadline) => Some(deadline),
            Err(err) => {
                errors.push(deadline_error(err));
                None
            }
        };

        let (Some(title), Some(deadline)) = (title, deadline) else {
            return Err(FormError::new(errors));
        };
        let description = non_blank(&self.draft.description);

        Ok(match self.mode {
            FormMode::Create => TaskRequest::Add(NewTask {
                title,
                description,
                deadline,
                ..NewTask::default()
            }),
            FormMode::Edit(id) => TaskRequest::Edit {
                id,
                patch: TaskPatch::default()
                    .title(title)
                    .description(description)
                    .deadline(deadline),
            },
        })
    }
}

pub(crate) fn deadline_error(err: TaskValidationError) -> FieldError {
    FieldError {
        field: FormField::Deadline,
        message: err.to_string(),
    }
}
