//! Sales record API 模块
//!
//! | 路径 | 方法 | 角色 |
//! |------|------|------|
//! | /api/sales | GET, POST | any |
//! | /api/sales/{id} | GET | any (tenant users: own records only) |
//! | /api/sales/{id} | PUT, DELETE | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sales", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id));

    let admin_routes = Router::new()
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(admin_routes)
}
