//! Closed set of store requests and their outcomes.

use crate::model::task::{NewTask, TaskId, TaskPatch};
use std::collections::HashSet;

/// One id or a batch of ids, as accepted by mark-complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSelection {
    One(TaskId),
    Many(Vec<TaskId>),
}

impl IdSelection {
    pub(crate) fn to_set(&self) -> HashSet<TaskId> {
        match self {
            Self::One(id) => HashSet::from([*id]),
            Self::Many(ids) => ids.iter().copied().collect(),
        }
    }
}

impl From<TaskId> for IdSelection {
    fn from(value: TaskId) -> Self {
        Self::One(value)
    }
}

impl From<Vec<TaskId>> for IdSelection {
    fn from(value: Vec<TaskId>) -> Self {
        Self::Many(value)
    }
}

impl From<&[TaskId]> for IdSelection {
    fn from(value: &[TaskId]) -> Self {
        Self::Many(value.to_vec())
    }
}

/// Every transition the store understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRequest {
    Add(NewTask),
    Edit { id: TaskId, patch: TaskPatch },
    Remove(TaskId),
    MarkComplete(IdSelection),
    /// Flips `completed` on one task. Not used by the table.
    Toggle(TaskId),
}

impl TaskRequest {
    pub fn mark_complete(ids: impl Into<IdSelection>) -> Self {
        Self::MarkComplete(ids.into())
    }

    /// Stable name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "task_add",
            Self::Edit { .. } => "task_edit",
            Self::Remove(_) => "task_remove",
            Self::MarkComplete(_) => "task_mark_complete",
            Self::Toggle(_) => "task_toggle",
        }
    }
}

/// What a request did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Added(TaskId),
    Edited(TaskId),
    Removed(TaskId),
    /// Completion flags recomputed; `completed` active tasks are now done.
    CompletionRecomputed { completed: usize },
    Toggled { id: TaskId, completed: bool },
    /// The referenced id is not in the active sequence; nothing changed.
    Ignored(TaskId),
}

