//! twtodo Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - The Taskwarrior command line
//! - The Microsoft Graph API
//! - Runtime specifics
//!
//! Both task populations (remote To-Do tasks and local Taskwarrior records)
//! are expressed in these types so the reconciliation logic can compare them.

pub mod error;
pub mod ids;
pub mod report;
pub mod status;
pub mod task;
pub mod timestamp;

// Re-export commonly used types
pub use error::CoreError;
pub use ids::{IdentityKey, ListId, LocalUuid, TodoTaskId};
pub use report::{ImportStats, SyncReport, UpdateStats};
pub use status::TaskStatus;
pub use task::{LocalTask, Task};

/// Taskwarrior UDA holding the Microsoft To-Do list id.
pub const UDA_LIST_ID: &str = "ms_todo_listid";

/// Taskwarrior UDA holding the Microsoft To-Do task id.
pub const UDA_TASK_ID: &str = "ms_todo_taskid";

/// Both identity UDAs with their human-readable labels.
pub const IDENTITY_ATTRIBUTES: [(&str, &str); 2] = [
    (UDA_LIST_ID, "MS To-Do List ID"),
    (UDA_TASK_ID, "MS To-Do Task ID"),
];
