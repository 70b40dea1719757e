//! Data models
//!
//! Shared between sales-server and its API clients. Field names follow the
//! persisted camelCase JSON shape.

pub mod period;
pub mod sales;
pub mod tenant;
pub mod user;

// Re-exports
pub use period::*;
pub use sales::*;
pub use tenant::*;
pub use user::*;
