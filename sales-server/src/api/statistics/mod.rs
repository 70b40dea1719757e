//! Statistics API 模块
//!
//! | 路径 | 方法 | 角色 |
//! |------|------|------|
//! | /api/statistics/overview?period=YYYY-MM | GET | admin |
//! | /api/statistics/monthly?tenantId= | GET | any (tenant users: own tenant) |

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/statistics", routes())
}

fn routes() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/overview", get(handler::overview))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/monthly", get(handler::monthly))
        .merge(admin_routes)
}
