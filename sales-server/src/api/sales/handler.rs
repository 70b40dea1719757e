//! Sales record API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::Response,
};
use serde::Deserialize;
use shared::models::{SalesRecord, SalesRecordCreate, SalesRecordUpdate};

use crate::audit_log;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::directory::DirectoryError;
use crate::utils::time::parse_period;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, committed, ok};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    pub tenant_id: Option<String>,
}

/// GET /api/sales - 売上一覧
///
/// Tenant users get their own records, newest period first. Admins get every
/// record in registration order, or one tenant's records with `?tenantId=`.
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<ApiResponse<Vec<SalesRecord>>>> {
    let ledger = state.ledger.read().await;
    let records = match current.scope(query.tenant_id.as_deref())? {
        Some(tenant_id) => ledger.records_for_tenant(tenant_id),
        None => ledger.records().to_vec(),
    };
    Ok(ok(records))
}

/// GET /api/sales/{id}
///
/// Another tenant's record answers 404 rather than 403.
pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SalesRecord>>> {
    let ledger = state.ledger.read().await;
    let record = ledger
        .get(&id)
        .filter(|r| current.is_admin() || current.own_tenant() == Some(r.tenant_id.as_str()))
        .ok_or_else(|| AppError::new(ErrorCode::SalesRecordNotFound).with_detail("id", id.clone()))?;
    Ok(ok(record.clone()))
}

/// POST /api/sales - 売上登録
///
/// Tenant users always register for their own tenant; admins name the
/// tenant with `tenantId`. The caller's account is re-read from the
/// directory, so a deleted, demoted or rebound user cannot write with an
/// old token.
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<SalesRecordCreate>,
) -> AppResult<Response> {
    let tenant_id = match current.own_tenant() {
        Some(own) => own.to_string(),
        None if current.is_admin() => payload
            .tenant_id
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::required("tenantId"))?
            .to_string(),
        None => return Err(AppError::forbidden("User is not bound to a tenant")),
    };
    let period = parse_period(&payload.period)?;

    {
        let directory = state.directory.read().await;
        let account = directory.get_user(&current.id).ok_or_else(|| {
            AppError::new(ErrorCode::TokenInvalid).with_detail("userId", current.id.clone())
        })?;
        if account.role != current.role || account.tenant() != current.own_tenant() {
            return Err(AppError::forbidden("Account has changed, sign in again"));
        }
        if directory.get_tenant(&tenant_id).is_none() {
            return Err(DirectoryError::TenantNotFound(tenant_id).into());
        }
    }

    let result = state
        .ledger
        .write()
        .await
        .insert(&tenant_id, &current.id, period, payload.amount)?;

    let record = &result.value;
    audit_log!(
        current.id,
        "create",
        format!("sales:{}", record.id),
        format!("tenant={} period={} amount={}", record.tenant_id, record.period, record.amount)
    );
    Ok(committed(result, "Sales record created"))
}

/// PUT /api/sales/{id} - 金額修正 (admin)
pub async fn update(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<SalesRecordUpdate>,
) -> AppResult<Response> {
    let result = state.ledger.write().await.update(&id, payload.amount)?;

    audit_log!(
        current.id,
        "update",
        format!("sales:{id}"),
        format!("amount={}", result.value.amount)
    );
    Ok(committed(result, "Sales record updated"))
}

/// DELETE /api/sales/{id} - 削除 (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let result = state.ledger.write().await.delete(&id)?;

    audit_log!(
        current.id,
        "delete",
        format!("sales:{id}"),
        format!("tenant={} period={}", result.value.tenant_id, result.value.period)
    );
    Ok(committed(result, "Sales record deleted"))
}
