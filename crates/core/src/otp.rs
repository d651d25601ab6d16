//! One-time login code rules.
//!
//! Codes are six decimal digits drawn uniformly from `100000..=999999` and
//! live for a short, configurable window. Every verification failure is
//! reported with the same message so callers cannot tell an unknown email
//! from a wrong or expired code.

use rand::Rng;
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Number of digits in a login code.
pub const OTP_CODE_LENGTH: usize = 6;

/// Smallest code that can be issued.
pub const OTP_CODE_MIN: u32 = 100_000;

/// Largest code that can be issued.
pub const OTP_CODE_MAX: u32 = 999_999;

/// Default code lifetime in minutes.
pub const DEFAULT_OTP_TTL_MINS: i64 = 10;

/// Default number of wrong guesses before the outstanding code is burned.
pub const DEFAULT_OTP_MAX_ATTEMPTS: i32 = 5;

/// Longest email address accepted (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// The one message used for every verification failure.
pub const INVALID_CODE_MESSAGE: &str = "Invalid or expired code";

/// A freshly drawn code and the instant it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    pub code: String,
    pub expires_at: Timestamp,
}

/// Draw a new code valid for `ttl_mins` from `now`.
pub fn issue_code(now: Timestamp, ttl_mins: i64) -> IssuedCode {
    let value = rand::rng().random_range(OTP_CODE_MIN..=OTP_CODE_MAX);
    IssuedCode {
        code: value.to_string(),
        expires_at: now + chrono::Duration::minutes(ttl_mins),
    }
}

/// Validate an email address before it touches storage.
///
/// The address is kept exactly as supplied; lookups are case-sensitive.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.len() > MAX_EMAIL_LENGTH || !email.validate_email() {
        return Err(CoreError::Validation("Invalid email".into()));
    }
    Ok(())
}

/// Validate the shape of a submitted code (six ASCII digits).
pub fn validate_code_format(code: &str) -> Result<(), CoreError> {
    if code.len() != OTP_CODE_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "Code must be {OTP_CODE_LENGTH} digits"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn issued_codes_are_six_digits_in_range() {
        let now = Utc::now();
        for _ in 0..200 {
            let issued = issue_code(now, DEFAULT_OTP_TTL_MINS);
            assert_eq!(issued.code.len(), OTP_CODE_LENGTH);
            let value: u32 = issued.code.parse().unwrap();
            assert!((OTP_CODE_MIN..=OTP_CODE_MAX).contains(&value));
        }
    }

    #[test]
    fn issued_code_expires_after_ttl() {
        let now = Utc::now();
        let issued = issue_code(now, 10);
        assert_eq!(issued.expires_at - now, Duration::minutes(10));
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("First.Last@Example.org").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
        assert!(validate_email("@x.com").is_err());
    }

    #[test]
    fn overlong_email_is_rejected() {
        let email = format!("{}@x.com", "a".repeat(MAX_EMAIL_LENGTH));
        assert!(validate_email(&email).is_err());
    }

    #[test]
    fn code_format_validation() {
        assert!(validate_code_format("123456").is_ok());
        assert!(validate_code_format("12345").is_err());
        assert!(validate_code_format("1234567").is_err());
        assert!(validate_code_format("12a456").is_err());
        assert!(validate_code_format("").is_err());
    }
}
