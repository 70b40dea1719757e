//! JWT Extractor
//!
//! Lets handlers take [`CurrentUser`] as an argument.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Reuses the user inserted by [`require_auth`](crate::auth::require_auth)
/// and falls back to validating the header itself when the middleware did
/// not run (routers assembled without the auth layer).
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(JwtService::extract_from_header)
            .ok_or_else(|| {
                security_log!(WARN, "auth_missing", uri = %parts.uri);
                AppError::unauthorized()
            })?;

        let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
            security_log!(WARN, "auth_failed", error = %e, uri = %parts.uri);
            AppError::from(e)
        })?;

        let user = CurrentUser::from(claims);
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
