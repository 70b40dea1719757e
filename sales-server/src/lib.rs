//! Sales Server - マルチテナント月次売上管理
//!
//! # 架构概述
//!
//! - **売上台帳** (`ledger`): 月次売上の登録・修正・削除と集計
//! - **Record store** (`store`): whole-collection persistence (redb / memory)
//! - **Directory** (`directory`): tenants and users
//! - **认证** (`auth`): JWT 认证, admin / tenant scoping
//! - **HTTP API** (`api`): RESTful API 接口
//! - **Export** (`export`): CSV download
//!
//! # 模块结构
//!
//! ```text
//! sales-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── ledger/        # SalesLedger + aggregation
//! ├── store/         # RecordStore, RedbStore, MemoryStore
//! ├── directory/     # tenants, users, demo seed
//! ├── export/        # CSV
//! ├── auth/          # JWT, middleware, extractor
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # errors, logger, time, format, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod directory;
pub mod export;
pub mod ledger;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use ledger::SalesLedger;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 设置运行环境: `.env`, 配置, 工作目录, 日志
///
/// Returns the loaded configuration. Must run inside the tokio runtime
/// because the file logger spawns its cleanup task.
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    config.ensure_work_dir_structure()?;
    utils::logger::init_logger(
        &config.log_level,
        config.log_json,
        Some(config.logs_dir().as_path()),
    )?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   _____       __
  / ___/____ _/ /__  _____
  \__ \/ __ `/ / _ \/ ___/
 ___/ / /_/ / /  __(__  )
/____/\__,_/_/\___/____/
    "#
    );
}
