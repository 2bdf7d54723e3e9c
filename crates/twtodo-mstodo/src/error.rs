//! Error types for the To-Do client.

use thiserror::Error;
use twtodo_core::CoreError;

/// Errors that can occur when talking to Microsoft Graph.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL cannot carry path segments.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The access token was rejected.
    #[error("unauthorized: check the configured access token")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success response.
    #[error("unexpected HTTP {status} from {path}: {body}")]
    UnexpectedStatus {
        status: u16,
        path: String,
        body: String,
    },

    /// The task carries a status or date outside the known vocabulary.
    #[error("task {task_id}: {source}")]
    Mapping {
        task_id: String,
        #[source]
        source: CoreError,
    },
}
