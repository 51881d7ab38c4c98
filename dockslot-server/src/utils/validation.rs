//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits live here.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: business name, trip title, vessel name, guest name, tags
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, reasons (weather hold reason, internal notes, policy text)
pub const MAX_NOTE_LEN: usize = 2000;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Captain message / SMS body sent to a guest
pub const MAX_MESSAGE_LEN: usize = 5000;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Minimal email shape check — one `@` with text on both sides.
///
/// 完整校验交给邮件服务；这里只拦掉明显错误的输入。
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    let mut parts = value.splitn(2, '@');
    let (local, domain) = (parts.next().unwrap_or(""), parts.next().unwrap_or(""));
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::validation(format!(
            "{field} is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate a positive count (party size, capacity, duration, step).
pub fn validate_positive(value: i64, field: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

/// Validate a non-negative money amount in cents.
pub fn validate_cents(value: i64, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("ok", "name", 10).is_ok());
        assert!(validate_required_text("  ", "name", 10).is_err());
        assert!(validate_required_text("toolongvalue", "name", 5).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("guest@example.com", "email").is_ok());
        assert!(validate_email("nope", "email").is_err());
        assert!(validate_email("a@b", "email").is_err());
    }

    #[test]
    fn money_and_counts() {
        assert!(validate_positive(4, "party_size").is_ok());
        assert!(validate_positive(0, "party_size").is_err());
        assert!(validate_cents(0, "deposit").is_ok());
        assert!(validate_cents(-1, "deposit").is_err());
    }
}
