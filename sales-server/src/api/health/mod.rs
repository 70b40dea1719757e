//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | liveness + record counts | 无 |
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "salesRecords": 6, "tenants": 3, "users": 4 }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    sales_records: usize,
    tenants: usize,
    users: usize,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let sales_records = state.ledger.read().await.len();
    let directory = state.directory.read().await;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sales_records,
        tenants: directory.list_tenants().len(),
        users: directory.list_users().len(),
    })
}
