//! Taskwarrior adapter for twtodo
//!
//! This crate hides the Taskwarrior command line behind the [`LocalStore`]
//! trait. Every operation is one (or two) discrete `task` invocations whose
//! output is parsed into the core domain types. The imported tasks carry the
//! Microsoft To-Do identity in two string UDAs.
//!
//! # Example
//!
//! ```rust,no_run
//! use twtodo_core::IdentityKey;
//! use twtodo_taskwarrior::{LocalStore, TaskwarriorCli};
//!
//! async fn import() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = TaskwarriorCli::new("task");
//!     let key = IdentityKey::new("AAMkAGI2", "AAMkAGI2TG");
//!
//!     if !store.exists(&key).await? {
//!         let uuid = store.create("Buy milk", &key).await?;
//!         println!("Created {}", uuid);
//!     }
//!     Ok(())
//! }
//! ```

mod cli;
mod error;
mod export;
mod setup;
mod store;

pub use cli::TaskwarriorCli;
pub use error::StoreError;
pub use export::parse_export;
pub use setup::ensure_identity_attributes;
pub use store::LocalStore;
