//! Task status and the mapping from each source's vocabulary.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Remote status literal selected by the open-task filter.
pub const REMOTE_STATUS_NOT_STARTED: &str = "notStarted";

/// Semantic status shared by remote tasks and local records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Work not finished.
    #[default]
    Pending,
    /// Work finished.
    Completed,
    /// Removed locally. Never produced by the remote source.
    Deleted,
}

impl TaskStatus {
    /// Map a Microsoft To-Do `taskStatus` value.
    ///
    /// Only `notStarted` is recognized; every other value is an error for
    /// that task.
    pub fn from_remote(value: &str) -> Result<Self, CoreError> {
        match value {
            REMOTE_STATUS_NOT_STARTED => Ok(Self::Pending),
            _ => Err(CoreError::UnknownStatus {
                source_name: "To-Do",
                value: value.to_string(),
            }),
        }
    }

    /// Map a Taskwarrior `status` value.
    ///
    /// `waiting` and `recurring` are not part of the recognized vocabulary.
    pub fn from_local(value: &str) -> Result<Self, CoreError> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "deleted" => Ok(Self::Deleted),
            _ => Err(CoreError::UnknownStatus {
                source_name: "Taskwarrior",
                value: value.to_string(),
            }),
        }
    }

    /// The Taskwarrior literal for this status.
    pub fn as_local(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Deleted => "deleted",
        }
    }

    /// Returns true if the task carries a completion timestamp locally.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
