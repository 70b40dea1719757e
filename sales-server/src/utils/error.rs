//! 统一错误处理
//!
//! Re-exports the shared error system and adds the response helpers used by
//! handlers.
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::new(ErrorCode::SalesRecordNotFound))
//!
//! // 返回成功响应
//! Ok(ok(record))
//! ```

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::HeaderValue;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::store::{Committed, StoreError};

/// Header set when a change was applied but its write-through failed
pub const PERSISTENCE_WARNING_HEADER: &str = "x-persistence-warning";

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}

/// Respond to a mutation; a failed write-through becomes a warning, not a failure
///
/// The body carries the committed value either way. When persistence failed
/// the message says so and the `x-persistence-warning` header is set.
pub fn committed<T: Serialize>(result: Committed<T>, message: &str) -> Response {
    match result.into_parts() {
        (value, None) => ok_with_message(value, message).into_response(),
        (value, Some(err)) => persistence_warning(value, message, &err),
    }
}

fn persistence_warning<T: Serialize>(value: T, message: &str, err: &StoreError) -> Response {
    tracing::error!(error = %err, "Change applied in memory but not persisted");
    let mut response =
        ok_with_message(value, format!("{message} (warning: changes may not be saved)"))
            .into_response();
    response.headers_mut().insert(
        PERSISTENCE_WARNING_HEADER,
        HeaderValue::from_static("store-write-failed"),
    );
    response
}
