//! Error types for the Taskwarrior adapter.

use thiserror::Error;
use twtodo_core::CoreError;

/// Errors that can occur while driving Taskwarrior.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Taskwarrior executable not found.
    #[error("Taskwarrior not found at '{0}'. Ensure Taskwarrior is installed.")]
    TaskNotFound(String),

    /// Failed to spawn the task process.
    #[error("Failed to spawn task process: {0}")]
    Spawn(#[from] std::io::Error),

    /// The task process exited with an unexpected code.
    #[error("'{command}' exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// The command succeeded but its output could not be interpreted.
    #[error("Unparsable output from '{command}': {output}")]
    UnparsableOutput { command: String, output: String },

    /// The export is not valid JSON.
    #[error("Invalid export JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An exported record lacks a required attribute.
    #[error("Exported task {uuid} has no string attribute '{attribute}'")]
    MissingAttribute { uuid: String, attribute: String },

    /// An exported record carries an unknown status or bad date.
    #[error("Exported task {uuid}: {source}")]
    Record {
        uuid: String,
        #[source]
        source: CoreError,
    },

    /// Update requested for a task without a local uuid.
    #[error("Cannot update task '{0}': empty uuid")]
    EmptyUuid(String),

    /// The record vanished before it could be updated.
    #[error("No Taskwarrior task with uuid {0}")]
    NotFound(String),

    /// Taskwarrior accepted the UDA definition but does not list it.
    #[error("UDA '{0}' still missing after creation")]
    UdaNotCreated(String),

    /// A UDA name that Taskwarrior would reject.
    #[error("Invalid UDA name: '{0}'")]
    InvalidUdaName(String),
}
