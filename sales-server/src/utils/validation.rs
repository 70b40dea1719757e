//! Input validation helpers
//!
//! Length limits applied at the HTTP boundary before payloads reach the
//! ledger or the directory.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Tenant and user display names
pub const MAX_NAME_LEN: usize = 200;

/// Tenant and user identifiers
pub const MAX_ID_LEN: usize = 64;

/// Passwords (stored as entered)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    validate_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_len(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("テナントA", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("abcd", "id", 3).is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 3 chars, 9 bytes
        assert!(validate_required_text("テナン", "name", 3).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "name", 1).is_ok());
        assert!(validate_optional_text(&Some("ab".into()), "name", 1).is_err());
    }
}
