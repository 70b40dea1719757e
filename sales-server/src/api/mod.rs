//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录 / 当前用户 / 登出
//! - [`sales`] - 売上記録 CRUD
//! - [`statistics`] - admin overview + monthly breakdown
//! - [`export`] - CSV download
//! - [`tenants`] - テナント管理 (admin)
//! - [`users`] - ユーザー管理 (admin)

pub mod auth;
pub mod export;
pub mod health;
pub mod sales;
pub mod statistics;
pub mod tenants;
pub mod users;

use axum::Router;
use axum::middleware;
use http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Access log line per request (target `http_access`)
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "{} {}",
        method,
        uri
    );
    response
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(sales::router())
        .merge(statistics::router())
        .merge(export::router())
        .merge(tenants::router())
        .merge(users::router())
}

/// Build the fully configured application with all middleware and state
///
/// Used by [`Server::run`](crate::core::Server::run) and by the integration
/// tests through `tower::ServiceExt::oneshot`.
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // JWT authentication, injects CurrentUser
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        // Outermost first
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new())
                .layer(SetRequestIdLayer::new(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    XRequestId,
                ))
                .layer(middleware::from_fn(log_request))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                ))),
        )
        .with_state(state)
}
