//! The local store abstraction used by the reconciliation engine.

use async_trait::async_trait;
use twtodo_core::{IdentityKey, LocalTask, LocalUuid};

use crate::error::StoreError;

/// Operations the reconciler needs from the local task database.
///
/// `TaskwarriorCli` implements this by shelling out; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// True if a record with this identity key exists, in any status.
    async fn exists(&self, key: &IdentityKey) -> Result<bool, StoreError>;

    /// Create one record carrying the identity key and return its uuid.
    async fn create(&self, title: &str, key: &IdentityKey) -> Result<LocalUuid, StoreError>;

    /// Overwrite title, status and completion time of an existing record.
    ///
    /// Fails with [`StoreError::NotFound`] if the record was removed meanwhile.
    async fn update(&self, task: &LocalTask) -> Result<(), StoreError>;

    /// Every record that carries the identity UDAs.
    ///
    /// One malformed record fails the whole export.
    async fn export_all(&self) -> Result<Vec<LocalTask>, StoreError>;

    /// True if the UDA is defined in the Taskwarrior configuration.
    async fn uda_exists(&self, name: &str) -> Result<bool, StoreError>;

    /// Define a string UDA with a label. Safe to repeat.
    async fn create_uda(&self, name: &str, label: &str) -> Result<(), StoreError>;
}
