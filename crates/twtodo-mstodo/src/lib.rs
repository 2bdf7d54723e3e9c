//! Microsoft To-Do client for twtodo.
//!
//! Wraps the Microsoft Graph `me/todo` endpoints behind the [`RemoteSource`]
//! trait. The client is constructed explicitly with a bearer token and passed
//! to whoever needs it; acquiring the token is left to the operator.

pub mod error;
pub mod graph;
pub mod source;

pub use error::RemoteError;
pub use graph::{GraphClient, TodoList, DEFAULT_BASE_URL};
pub use source::RemoteSource;
