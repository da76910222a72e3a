//! Read-only trash listing.

use crate::model::task::{format_deadline, Task, TaskId};
use chrono::NaiveDate;
use serde::Serialize;

/// One trash line: title, description and deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrashEntry {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
}

impl TrashEntry {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            deadline: task.deadline,
        }
    }

    /// Space-joined `title description deadline`, skipping missing parts.
    pub fn summary(&self) -> String {
        let mut parts = vec![self.title.clone()];
        if let Some(description) = &self.description {
            parts.push(description.clone());
        }
        if let Some(deadline) = self.deadline {
            parts.push(format_deadline(deadline));
        }
        parts.join(" ")
    }
}

/// Entries for `trash`, oldest removal first.
pub fn trash_entries(trash: &[Task]) -> Vec<TrashEntry> {
    trash.iter().map(TrashEntry::from_task).collect()
}
