use thiserror::Error;

use crate::directory::error::DirectoryError;
use crate::ledger::LedgerError;
use crate::store::StoreError;

/// Startup and lifecycle errors
///
/// Request-level failures use [`AppError`](crate::utils::AppError); these
/// only surface from [`ServerState::initialize`](crate::core::ServerState::initialize)
/// and [`Server::run`](crate::core::Server::run).
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to open record store: {0}")]
    Store(#[from] StoreError),

    #[error("failed to load sales ledger: {0}")]
    Ledger(#[from] LedgerError),

    #[error("failed to load directory: {0}")]
    Directory(#[from] DirectoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// 启动阶段的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
