//! Export API 模块
//!
//! | 路径 | 方法 | 角色 |
//! |------|------|------|
//! | /api/export/sales.csv | GET | any (tenant users: own records) |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/export/sales.csv", get(handler::sales_csv))
}
