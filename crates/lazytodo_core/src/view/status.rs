//! Display status derived at render time.
//!
//! The status is computed from `completed` and `deadline` only. The stored
//! `overdue` flag is not consulted.

use crate::model::task::Task;
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Status shown in the table's status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Pending,
    Overdue,
    Completed,
}

/// Badge color class paired with a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Default,
    Error,
    Success,
}

impl DisplayStatus {
    /// `Completed` wins; otherwise `Overdue` when the deadline (start of day,
    /// UTC) is strictly before `now`; otherwise `Pending`.
    pub fn derive(task: &Task, now: DateTime<Utc>) -> Self {
        if task.completed {
            return Self::Completed;
        }
        match task.deadline {
            Some(deadline) if deadline.and_time(NaiveTime::MIN).and_utc() < now => Self::Overdue,
            _ => Self::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
            Self::Completed => "Completed",
        }
    }

    pub fn tone(self) -> BadgeTone {
        match self {
            Self::Pending => BadgeTone::Default,
            Self::Overdue => BadgeTone::Error,
            Self::Completed => BadgeTone::Success,
        }
    }
}

impl Display for DisplayStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
