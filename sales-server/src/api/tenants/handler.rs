//! Tenant API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::Response,
};
use serde::Serialize;
use shared::models::{TenantCreate, TenantUpdate};

use crate::audit_log;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::validation::{MAX_ID_LEN, MAX_NAME_LEN, validate_optional_text, validate_required_text};
use crate::utils::{ApiResponse, AppResult, committed, ok};

/// Tenant with the number of users bound to it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRow {
    pub id: String,
    pub name: String,
    pub user_count: usize,
}

/// GET /api/tenants - テナント一覧
pub async fn list(State(state): State<ServerState>) -> Json<ApiResponse<Vec<TenantRow>>> {
    let directory = state.directory.read().await;
    let rows = directory
        .list_tenants()
        .iter()
        .map(|t| TenantRow {
            id: t.id.clone(),
            name: t.name.clone(),
            user_count: directory.user_count(&t.id),
        })
        .collect();
    ok(rows)
}

/// POST /api/tenants - テナント追加
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<TenantCreate>,
) -> AppResult<Response> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.id, "id", MAX_ID_LEN)?;

    let result = state.directory.write().await.create_tenant(payload)?;

    audit_log!(
        current.id,
        "create",
        format!("tenant:{}", result.value.id),
        result.value.name.as_str()
    );
    Ok(committed(result, "Tenant created"))
}

/// PUT /api/tenants/{id} - テナント名変更
pub async fn update(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<TenantUpdate>,
) -> AppResult<Response> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let result = state.directory.write().await.update_tenant(&id, payload)?;

    audit_log!(current.id, "update", format!("tenant:{id}"), result.value.name.as_str());
    Ok(committed(result, "Tenant updated"))
}

/// DELETE /api/tenants/{id} - テナント削除
///
/// Refused while users are bound to the tenant; its sales records stay.
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let result = state.directory.write().await.delete_tenant(&id)?;

    audit_log!(current.id, "delete", format!("tenant:{id}"));
    Ok(committed(result, "Tenant deleted"))
}
