//! User API Handlers
//!
//! Responses use [`UserResponse`], so passwords never leave the server.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::Response,
};
use shared::models::{UserCreate, UserResponse, UserUpdate};

use crate::audit_log;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::validation::{
    MAX_ID_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppResult, committed, ok};

/// GET /api/users - ユーザー一覧
pub async fn list(State(state): State<ServerState>) -> Json<ApiResponse<Vec<UserResponse>>> {
    let directory = state.directory.read().await;
    ok(directory.list_users().iter().map(UserResponse::from).collect())
}

/// POST /api/users - ユーザー追加
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Response> {
    validate_required_text(&payload.id, "id", MAX_ID_LEN)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let result = state
        .directory
        .write()
        .await
        .create_user(payload)?
        .map(|user| UserResponse::from(&user));

    audit_log!(
        current.id,
        "create",
        format!("user:{}", result.value.id),
        format!("role={} tenant={}", result.value.role, result.value.tenant_id)
    );
    Ok(committed(result, "User created"))
}

/// PUT /api/users/{id} - ユーザー編集
///
/// Absent fields keep their value; an empty password keeps the current one.
pub async fn update(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Response> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let result = state
        .directory
        .write()
        .await
        .update_user(&id, payload)?
        .map(|user| UserResponse::from(&user));

    audit_log!(
        current.id,
        "update",
        format!("user:{id}"),
        format!("role={} tenant={}", result.value.role, result.value.tenant_id)
    );
    Ok(committed(result, "User updated"))
}

/// DELETE /api/users/{id} - ユーザー削除
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let result = state
        .directory
        .write()
        .await
        .delete_user(&id)?
        .map(|user| UserResponse::from(&user));

    audit_log!(current.id, "delete", format!("user:{id}"));
    Ok(committed(result, "User deleted"))
}
