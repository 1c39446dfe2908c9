//! Input validation helpers
//!
//! Centralized text length limits and format checks for the public
//! registration form. SQLite TEXT has no built-in length enforcement.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Person names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Short identifiers: phone numbers, source tags
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Formats ─────────────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone regex"));

static PHONE_SEPARATORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("phone separator regex"));

/// Validate that a required string is non-blank and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required_field(field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Strip spaces, dashes and parentheses from a phone number
pub fn normalize_phone(phone: &str) -> String {
    PHONE_SEPARATORS_RE.replace_all(phone, "").into_owned()
}

/// Optional `+`, non-zero leading digit, at most 16 digits after separators are removed.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(&normalize_phone(phone))
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if !is_valid_email(email) {
        return Err(AppError::new(ErrorCode::InvalidEmail));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    if !is_valid_phone(phone) {
        return Err(AppError::new(ErrorCode::InvalidPhone));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("ana@x.com"));
        assert!(is_valid_email("first.last+tag@mail.example.es"));
        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("ana@x"));
        assert!(!is_valid_email("ana @x.com"));
        assert!(!is_valid_email("ana@@x.com"));
        assert!(!is_valid_email("@x.com"));
    }

    #[test]
    fn test_phone_format() {
        assert!(is_valid_phone("+15551234567"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("+34 600 12 34 56"));
        assert!(!is_valid_phone("0555123"));
        assert!(!is_valid_phone("+0555123"));
        assert!(!is_valid_phone("555-CALL-NOW"));
        assert!(!is_valid_phone("12345678901234567"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone(" (555) 123-45 67 "), "5551234567");
        assert_eq!(normalize_phone("+1-555"), "+1555");
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Ana", "name", MAX_NAME_LEN).is_ok());

        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let long = "a".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_format_errors_carry_domain_codes() {
        assert_eq!(
            validate_email("nope").unwrap_err().code,
            ErrorCode::InvalidEmail
        );
        assert_eq!(
            validate_phone("abc").unwrap_err().code,
            ErrorCode::InvalidPhone
        );
    }
}
