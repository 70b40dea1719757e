use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// Record store backend selected by `STORE_BACKEND`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// redb file at `<WORK_DIR>/database/sales.redb`
    Redb,
    /// Process memory, lost on exit
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redb" => Ok(Self::Redb),
            "memory" => Ok(Self::Memory),
            other => Err(ServerError::Config(format!(
                "unknown STORE_BACKEND '{other}', expected 'redb' or 'memory'"
            ))),
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (database/ + logs/) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | STORE_BACKEND | redb | `redb` 或 `memory` |
/// | SEED_DEMO_DATA | true | 空集合时写入演示数据 |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_JSON | production 时为 true | JSON 日志 |
/// | JWT_* | 见 [`JwtConfig`] | 令牌设置 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/sales HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    pub store_backend: StoreBackend,
    /// Fill empty collections with the demo tenants, users and sales
    pub seed_demo_data: bool,
    pub log_level: String,
    pub log_json: bool,
    /// JWT 认证配置
    pub jwt: JwtConfig,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的变量使用默认值；格式错误的 `STORE_BACKEND` 或 JWT 设置返回错误。
    pub fn from_env() -> Result<Self> {
        let environment = env_or("ENVIRONMENT", "development");
        let is_production = environment == "production";

        Ok(Self {
            work_dir: env_or("WORK_DIR", "./data"),
            http_port: env_parse("HTTP_PORT").unwrap_or(3000),
            store_backend: env_or("STORE_BACKEND", "redb").parse()?,
            seed_demo_data: env_parse("SEED_DEMO_DATA").unwrap_or(true),
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: env_parse("LOG_JSON").unwrap_or(is_production),
            jwt: JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?,
            environment,
        })
    }

    /// In-memory configuration for tests
    ///
    /// Memory backend, demo data seeded, fixed JWT secret, never reads the
    /// environment.
    pub fn for_tests() -> Self {
        Self {
            work_dir: std::env::temp_dir()
                .join("sales-server-test")
                .to_string_lossy()
                .into_owned(),
            http_port: 0,
            environment: "test".into(),
            store_backend: StoreBackend::Memory,
            seed_demo_data: true,
            log_level: "warn".into(),
            log_json: false,
            jwt: JwtConfig::with_secret("test-secret-that-is-at-least-32-characters"),
        }
    }

    /// 使用自定义值覆盖部分配置
    pub fn with_overrides(mut self, work_dir: impl Into<String>, http_port: u16) -> Self {
        self.work_dir = work_dir.into();
        self.http_port = http_port;
        self
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("sales.redb")
    }

    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> Result<()> {
        for dir in [self.database_dir(), self.logs_dir()] {
            std::fs::create_dir_all(&dir)
                .map_err(|e| ServerError::Config(format!("cannot create {}: {e}", dir.display())))?;
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
