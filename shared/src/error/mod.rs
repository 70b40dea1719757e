//! Unified error system for the sales ledger
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! | Range | Category |
//! |-------|----------|
//! | 0xxx  | General |
//! | 1xxx  | Authentication |
//! | 2xxx  | Permission |
//! | 3xxx  | Tenant |
//! | 4xxx  | Sales record |
//! | 8xxx  | User |
//! | 9xxx  | System |
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::DuplicatePeriod)
//!     .with_detail("period", "2024-03");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(4002));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
