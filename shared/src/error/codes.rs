//! Unified error codes for the sales ledger
//!
//! This module defines all error codes used across sales-server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant errors
//! - 4xxx: Sales record errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (user id/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,
    /// Cannot delete or demote the last administrator
    CannotDeleteAdmin = 2005,

    // ==================== 3xxx: Tenant ====================
    /// Tenant not found
    TenantNotFound = 3002,
    /// Tenant id already in use
    TenantIdExists = 3101,
    /// Tenant is still referenced by users
    TenantInUse = 3102,
    /// Tenant already has a non-admin user
    TenantAlreadyAssigned = 3103,
    /// Tenant users must be bound to a tenant
    TenantRequired = 3104,

    // ==================== 4xxx: Sales ====================
    /// Sales record not found
    SalesRecordNotFound = 4001,
    /// A record for this tenant and period already exists
    DuplicatePeriod = 4002,
    /// Amount is non-numeric, fractional or negative
    InvalidAmount = 4003,
    /// Period is not a valid YYYY-MM value
    InvalidPeriod = 4004,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// User id already exists
    UserIdExists = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,

    // ==================== 94xx: Storage ====================
    /// Record store write failed (in-memory state already changed)
    PersistenceFailed = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid user id or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::CannotDeleteAdmin => "Cannot remove the last administrator",

            // Tenant
            ErrorCode::TenantNotFound => "Tenant not found",
            ErrorCode::TenantIdExists => "Tenant id is already in use",
            ErrorCode::TenantInUse => "Tenant is in use and cannot be deleted",
            ErrorCode::TenantAlreadyAssigned => "Tenant is already assigned to another user",
            ErrorCode::TenantRequired => "Tenant users must select a tenant",

            // Sales
            ErrorCode::SalesRecordNotFound => "Sales record not found",
            ErrorCode::DuplicatePeriod => "Sales for this period are already registered",
            ErrorCode::InvalidAmount => "Amount must be a non-negative integer",
            ErrorCode::InvalidPeriod => "Period must be formatted as YYYY-MM",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserIdExists => "User id is already in use",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",

            // Storage
            ErrorCode::PersistenceFailed => "Change applied but could not be persisted",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),
            2005 => Ok(ErrorCode::CannotDeleteAdmin),

            // Tenant
            3002 => Ok(ErrorCode::TenantNotFound),
            3101 => Ok(ErrorCode::TenantIdExists),
            3102 => Ok(ErrorCode::TenantInUse),
            3103 => Ok(ErrorCode::TenantAlreadyAssigned),
            3104 => Ok(ErrorCode::TenantRequired),

            // Sales
            4001 => Ok(ErrorCode::SalesRecordNotFound),
            4002 => Ok(ErrorCode::DuplicatePeriod),
            4003 => Ok(ErrorCode::InvalidAmount),
            4004 => Ok(ErrorCode::InvalidPeriod),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UserIdExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            // Storage
            9401 => Ok(ErrorCode::PersistenceFailed),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::TenantInUse.code(), 3102);
        assert_eq!(ErrorCode::DuplicatePeriod.code(), 4002);
        assert_eq!(ErrorCode::InvalidAmount.code(), 4003);
        assert_eq!(ErrorCode::UserIdExists.code(), 8002);
        assert_eq!(ErrorCode::PersistenceFailed.code(), 9401);
    }

    #[test]
    fn test_try_from_round_trips_every_code() {
        let all = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidFormat,
            ErrorCode::RequiredField,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::PermissionDenied,
            ErrorCode::AdminRequired,
            ErrorCode::CannotDeleteAdmin,
            ErrorCode::TenantNotFound,
            ErrorCode::TenantIdExists,
            ErrorCode::TenantInUse,
            ErrorCode::TenantAlreadyAssigned,
            ErrorCode::TenantRequired,
            ErrorCode::SalesRecordNotFound,
            ErrorCode::DuplicatePeriod,
            ErrorCode::InvalidAmount,
            ErrorCode::InvalidPeriod,
            ErrorCode::UserNotFound,
            ErrorCode::UserIdExists,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::ConfigError,
            ErrorCode::PersistenceFailed,
            ErrorCode::StorageCorrupted,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_unknown_value() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::DuplicatePeriod).unwrap();
        assert_eq!(json, "4002");
        let code: ErrorCode = serde_json::from_str("3102").unwrap();
        assert_eq!(code, ErrorCode::TenantInUse);
    }
}
