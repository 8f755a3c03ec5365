/// Request field validation helpers
use crate::{AppError, Result};

/// Reject empty or whitespace-only fields; the error names the first
/// offending field.
pub fn require_non_empty(fields: &[(&str, &str)]) -> Result<()> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "The {} field is required and cannot be empty",
                name
            )));
        }
    }
    Ok(())
}

/// Minimal plausibility check, matching the registration contract.
pub fn validate_email(email: &str) -> Result<()> {
    if !email.contains('@') {
        return Err(AppError::BadRequest("Email field is invalid".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_empty_fields() {
        assert!(require_non_empty(&[("username", "alice"), ("email", "a@b.c")]).is_ok());
    }

    #[test]
    fn rejects_empty_field() {
        let err = require_non_empty(&[("username", "alice"), ("password", "")]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("password")));
    }

    #[test]
    fn rejects_whitespace_only_field() {
        let err = require_non_empty(&[("fullname", "   ")]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn email_must_contain_at_sign() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }
}
