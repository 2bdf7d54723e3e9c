//! HTTP request handlers.

mod health;
mod pull;

pub use health::health_check;
pub use pull::pull;
