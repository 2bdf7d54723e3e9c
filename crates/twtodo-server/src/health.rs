//! Startup precondition check.

use thiserror::Error;
use tracing::{info, warn};

use twtodo_core::IDENTITY_ATTRIBUTES;
use twtodo_taskwarrior::{LocalStore, StoreError};

#[derive(Debug, Error)]
pub enum HealthError {
    #[error(
        "The following Taskwarrior UDAs have to exist: {}. Create them by running 'twtodo setup'.",
        .0.join(", ")
    )]
    MissingAttributes(Vec<String>),

    #[error("Failed to query Taskwarrior UDAs: {0}")]
    Store(#[from] StoreError),
}

/// Fail unless both identity UDAs are defined.
///
/// Never creates anything; that is left to `twtodo setup`.
pub async fn check_identity_attributes(store: &dyn LocalStore) -> Result<(), HealthError> {
    let mut missing = Vec::new();
    for (name, _) in IDENTITY_ATTRIBUTES {
        if !store.uda_exists(name).await? {
            missing.push(name.to_string());
        }
    }

    if missing.is_empty() {
        info!("Taskwarrior identity UDAs present");
        Ok(())
    } else {
        warn!(missing = ?missing, "Taskwarrior identity UDAs missing");
        Err(HealthError::MissingAttributes(missing))
    }
}
