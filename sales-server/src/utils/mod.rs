//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - [`format`] - yen and percentage display
//! - [`time`] - reporting periods from the local clock
//! - [`validation`] - text length limits
//! - [`logger`] - tracing setup, `audit_log!` / `security_log!`

pub mod error;
pub mod format;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use error::{PERSISTENCE_WARNING_HEADER, committed, ok, ok_with_message};
