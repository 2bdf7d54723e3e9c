//! Shared application state.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::engine::Reconciler;

/// Shared application state.
pub struct AppState {
    /// The engine every pull request runs.
    pub reconciler: Reconciler,

    /// Held for the whole of a sync run, so concurrent pulls queue up.
    pub sync_lock: Mutex<()>,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(reconciler: Reconciler) -> Arc<Self> {
        Arc::new(Self {
            reconciler,
            sync_lock: Mutex::new(()),
        })
    }
}
