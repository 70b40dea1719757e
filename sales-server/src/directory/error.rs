//! Directory errors

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("tenant not found: {0}")]
    TenantNotFound(String),

    #[error("tenant id already in use: {0}")]
    TenantIdExists(String),

    #[error("tenant {tenant_id} is referenced by {users} user(s)")]
    TenantInUse { tenant_id: String, users: usize },

    #[error("tenant {tenant_id} is already assigned to user {user_id}")]
    TenantAlreadyAssigned { tenant_id: String, user_id: String },

    #[error("tenant users must select a tenant")]
    TenantRequired,

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("user id already in use: {0}")]
    UserIdExists(String),

    #[error("the last administrator cannot be removed or demoted")]
    LastAdmin,

    #[error("invalid user id or password")]
    InvalidCredentials,

    #[error("failed to load {key}: {source}")]
    Load {
        key: &'static str,
        #[source]
        source: StoreError,
    },
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Required(field) => AppError::required(field),
            DirectoryError::TenantNotFound(id) => {
                AppError::new(ErrorCode::TenantNotFound).with_detail("tenantId", id)
            }
            DirectoryError::TenantIdExists(id) => {
                AppError::new(ErrorCode::TenantIdExists).with_detail("tenantId", id)
            }
            DirectoryError::TenantInUse { tenant_id, users } => {
                AppError::new(ErrorCode::TenantInUse)
                    .with_detail("tenantId", tenant_id)
                    .with_detail("users", users)
            }
            DirectoryError::TenantAlreadyAssigned { tenant_id, user_id } => {
                AppError::new(ErrorCode::TenantAlreadyAssigned)
                    .with_detail("tenantId", tenant_id)
                    .with_detail("userId", user_id)
            }
            DirectoryError::TenantRequired => AppError::new(ErrorCode::TenantRequired),
            DirectoryError::UserNotFound(id) => {
                AppError::new(ErrorCode::UserNotFound).with_detail("userId", id)
            }
            DirectoryError::UserIdExists(id) => {
                AppError::new(ErrorCode::UserIdExists).with_detail("userId", id)
            }
            DirectoryError::LastAdmin => AppError::new(ErrorCode::CannotDeleteAdmin),
            DirectoryError::InvalidCredentials => AppError::invalid_credentials(),
            e @ DirectoryError::Load { .. } => AppError::database(e.to_string()),
        }
    }
}
