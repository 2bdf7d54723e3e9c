//! The remote source abstraction used by the reconciliation engine.

use async_trait::async_trait;
use twtodo_core::{IdentityKey, ListId, Task};

use crate::error::RemoteError;

/// Read access to remote to-do tasks.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Tasks in the list whose remote status is `notStarted`.
    ///
    /// Returned tasks are `Pending` with no completion time.
    async fn fetch_open_tasks(&self, list_id: &ListId) -> Result<Vec<Task>, RemoteError>;

    /// Current remote state of a single task.
    async fn fetch_task(&self, key: &IdentityKey) -> Result<Task, RemoteError>;
}
