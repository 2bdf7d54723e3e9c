//! twtodo Sync Server Library
//!
//! This crate provides the reconciliation engine that pulls Microsoft To-Do
//! tasks into Taskwarrior, the startup health check, configuration and the
//! HTTP surface the `twtodo` CLI talks to.

pub mod config;
pub mod engine;
pub mod health;
pub mod http;
pub mod logging;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use engine::{Reconciler, SyncError};
pub use health::{check_identity_attributes, HealthError};
pub use state::AppState;
