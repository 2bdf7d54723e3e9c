//! HTTP request and response types.
//!
//! Shared with the `twtodo` CLI, which deserializes the same shapes.

use serde::{Deserialize, Serialize};

use twtodo_core::SyncReport;

/// Request body for the pull endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// To-Do list whose open tasks are imported.
    pub list_id: String,
}

/// Response body for a completed pull.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullResponse {
    /// Human-readable summary, printed by the CLI as is.
    pub message: String,

    pub report: SyncReport,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
