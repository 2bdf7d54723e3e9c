//! Reconciliation engine.
//!
//! One run has two phases, executed in order:
//!
//! 1. **Update**: every task Taskwarrior already tracks is compared with its
//!    current remote state and overwritten when they differ.
//! 2. **Import**: every open remote task of the requested list that has no
//!    local counterpart yet is created.
//!
//! Per-task failures are logged and counted, never propagated. Only a failed
//! local export fails the run as a whole.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use twtodo_core::{ImportStats, ListId, LocalTask, SyncReport, Task, UpdateStats};
use twtodo_mstodo::{RemoteError, RemoteSource};
use twtodo_taskwarrior::{LocalStore, StoreError};

/// Errors that stop a phase.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Taskwarrior could not list the tracked tasks.
    #[error("Failed to export Taskwarrior tasks while syncing list '{list_id}': {source}")]
    Export {
        list_id: ListId,
        #[source]
        source: StoreError,
    },

    /// The open tasks of the list could not be fetched.
    #[error("Failed to fetch open tasks of To-Do list '{list_id}': {source}")]
    FetchOpenTasks {
        list_id: ListId,
        #[source]
        source: RemoteError,
    },
}

/// Pulls remote state into the local store.
///
/// The reconciler awaits every adapter call in sequence. Callers that share
/// one instance across requests must serialize runs themselves.
pub struct Reconciler {
    store: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteSource>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn LocalStore>, remote: Arc<dyn RemoteSource>) -> Self {
        Self { store, remote }
    }

    /// Run both phases for `list_id`.
    ///
    /// A failed open-task fetch skips the import phase and is recorded in
    /// [`SyncReport::import_error`]; the update counters are still returned.
    pub async fn sync(&self, list_id: &ListId) -> Result<SyncReport, SyncError> {
        info!(list_id = %list_id, "Starting sync");

        let update = self.update_existing(list_id).await?;

        let (import, import_error) = match self.import_open(list_id).await {
            Ok(stats) => (stats, None),
            Err(e) => {
                error!(list_id = %list_id, error = %e, "Import phase aborted");
                (ImportStats::default(), Some(e.to_string()))
            }
        };

        info!(
            list_id = %list_id,
            examined = update.examined,
            updated = update.updated,
            created = import.created,
            "Sync finished"
        );

        Ok(SyncReport {
            update,
            import,
            import_error,
        })
    }

    /// Bring every locally tracked task in line with its remote state.
    ///
    /// All tracked tasks are examined, whatever list they belong to.
    /// `list_id` only gives context to a failed export.
    pub async fn update_existing(&self, list_id: &ListId) -> Result<UpdateStats, SyncError> {
        let local_tasks = self
            .store
            .export_all()
            .await
            .map_err(|source| SyncError::Export {
                list_id: list_id.clone(),
                source,
            })?;

        let mut stats = UpdateStats {
            examined: local_tasks.len(),
            ..Default::default()
        };

        for local in &local_tasks {
            let remote = match self.remote.fetch_task(local.key()).await {
                Ok(task) => task,
                Err(e) => {
                    warn!(
                        key = %local.key(),
                        uuid = %local.uuid,
                        error = %e,
                        "Failed to fetch remote task"
                    );
                    stats.errors += 1;
                    continue;
                }
            };

            if local.task.is_up_to_date(&remote) {
                debug!(uuid = %local.uuid, "Local task up-to-date");
                stats.up_to_date += 1;
                continue;
            }

            match self.store.update(&converged(local, remote)).await {
                Ok(()) => {
                    info!(uuid = %local.uuid, title = %local.task.title, "Updated local task");
                    stats.updated += 1;
                }
                Err(e) => {
                    warn!(uuid = %local.uuid, error = %e, "Failed to update local task");
                    stats.errors += 1;
                }
            }
        }

        Ok(stats)
    }

    /// Create a local task for each open remote task not tracked yet.
    pub async fn import_open(&self, list_id: &ListId) -> Result<ImportStats, SyncError> {
        let open_tasks = self
            .remote
            .fetch_open_tasks(list_id)
            .await
            .map_err(|source| SyncError::FetchOpenTasks {
                list_id: list_id.clone(),
                source,
            })?;

        let mut stats = ImportStats {
            fetched: open_tasks.len(),
            ..Default::default()
        };

        for task in &open_tasks {
            match self.store.exists(&task.key).await {
                Ok(true) => {
                    debug!(key = %task.key, "Task already exists locally");
                    stats.existed += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(key = %task.key, error = %e, "Failed to look up local task");
                    stats.errors += 1;
                    continue;
                }
            }

            match self.store.create(&task.title, &task.key).await {
                Ok(uuid) => {
                    info!(key = %task.key, uuid = %uuid, title = %task.title, "Created local task");
                    stats.created += 1;
                }
                Err(e) => {
                    warn!(key = %task.key, title = %task.title, error = %e, "Failed to create local task");
                    stats.errors += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// Remote content under the local uuid.
fn converged(local: &LocalTask, remote: Task) -> LocalTask {
    LocalTask::new(local.uuid.clone(), remote)
}
