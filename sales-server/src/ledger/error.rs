//! Ledger errors

use shared::error::{AppError, ErrorCode};
use shared::models::{InvalidAmount, InvalidPeriod, Period};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("sales for tenant {tenant_id} in {period} are already registered")]
    DuplicatePeriod { tenant_id: String, period: Period },

    #[error(transparent)]
    InvalidAmount(#[from] InvalidAmount),

    #[error(transparent)]
    InvalidPeriod(#[from] InvalidPeriod),

    #[error("sales record not found: {0}")]
    NotFound(String),

    #[error("failed to load sales records: {0}")]
    Load(#[source] StoreError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::DuplicatePeriod { tenant_id, period } => {
                AppError::new(ErrorCode::DuplicatePeriod)
                    .with_detail("tenantId", tenant_id)
                    .with_detail("period", period.to_string())
            }
            LedgerError::InvalidAmount(e) => {
                AppError::new(ErrorCode::InvalidAmount).with_detail("amount", e.0)
            }
            LedgerError::InvalidPeriod(e) => {
                AppError::new(ErrorCode::InvalidPeriod).with_detail("period", e.0)
            }
            LedgerError::NotFound(id) => {
                AppError::new(ErrorCode::SalesRecordNotFound).with_detail("id", id)
            }
            LedgerError::Load(e) => AppError::database(e.to_string()),
        }
    }
}
