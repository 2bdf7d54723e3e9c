//! Task and LocalTask types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{IdentityKey, LocalUuid, TaskStatus};

/// A task as seen by either source, joined on its identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Remote list id and task id.
    pub key: IdentityKey,

    /// Task title (Taskwarrior description).
    pub title: String,

    /// When the task was completed. `None` means not completed.
    pub completed_at: Option<DateTime<Utc>>,

    /// Current status.
    pub status: TaskStatus,
}

impl Task {
    /// Create a new pending Task.
    pub fn new(key: IdentityKey, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            completed_at: None,
            status: TaskStatus::Pending,
        }
    }

    /// Builder method to mark the task completed at the given time.
    pub fn completed(mut self, at: DateTime<Utc>) -> Self {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(at);
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Compare the data fields of two tasks.
    ///
    /// The identity key and any local uuid are ignored.
    pub fn is_up_to_date(&self, other: &Task) -> bool {
        self.title == other.title
            && self.completed_at == other.completed_at
            && self.status == other.status
    }
}

/// A Task stored in Taskwarrior, carrying the local record identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTask {
    /// Taskwarrior uuid. Must be non-empty for updates.
    pub uuid: LocalUuid,

    #[serde(flatten)]
    pub task: Task,
}

impl LocalTask {
    pub fn new(uuid: impl Into<LocalUuid>, task: Task) -> Self {
        Self {
            uuid: uuid.into(),
            task,
        }
    }

    pub fn key(&self) -> &IdentityKey {
        &self.task.key
    }
}
