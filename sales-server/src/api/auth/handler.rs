//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, UserInfo};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ok};
use crate::{audit_log, security_log};

/// Fixed delay before answering a login, success or failure
const AUTH_FIXED_DELAY_MS: u64 = 100;

/// POST /api/auth/login
///
/// Unknown id and wrong password share one error so ids cannot be probed.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let directory = state.directory.read().await;
    let user = match directory.authenticate(req.user_id.trim(), &req.password) {
        Ok(user) => user,
        Err(e) => {
            security_log!(WARN, "login_failed", user_id = %req.user_id, reason = "invalid_credentials");
            return Err(e.into());
        }
    };

    let token = state.get_jwt_service().generate_token(user)?;
    let tenant_name = user
        .tenant()
        .and_then(|t| directory.tenant_name(t).ok())
        .map(str::to_string);

    security_log!(INFO, "login_success", user_id = %user.id, role = %user.role);
    audit_log!(user.id, "login", format!("user:{}", user.id));

    Ok(ok(LoginResponse {
        token,
        user: UserInfo::from_user(user, tenant_name),
    }))
}

/// GET /api/auth/me
///
/// Reads the directory rather than the token so renamed users and tenants
/// show their current names.
pub async fn me(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let directory = state.directory.read().await;
    let user = directory
        .get_user(&current.id)
        .ok_or_else(|| {
            AppError::new(shared::ErrorCode::UserNotFound).with_detail("id", current.id.clone())
        })?;
    let tenant_name = user
        .tenant()
        .and_then(|t| directory.tenant_name(t).ok())
        .map(str::to_string);
    Ok(ok(UserInfo::from_user(user, tenant_name)))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout(current: CurrentUser) -> Json<ApiResponse<()>> {
    audit_log!(current.id, "logout", format!("user:{}", current.id));
    let mut response = ApiResponse::ok();
    response.message = "Logged out".to_string();
    Json(response)
}
