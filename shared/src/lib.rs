//! Shared types for the multi-tenant sales ledger
//!
//! Domain models, auth DTOs, the unified error system and ID generation,
//! used by sales-server and by API clients.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
