//! Client-side credential validation. Every rejection here happens before any
//! network call is made; messages are rendered inline in the form.

use crate::app_lib::AppError;

/// Minimum password length enforced by the client for early UX feedback.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Normalizes an email for requests and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
pub fn valid_email(email_normalized: &str) -> bool {
    let Some((local, domain)) = email_normalized.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email_normalized.contains(char::is_whitespace)
}

/// Confirms the password pair: byte-equal confirmation, then minimum length.
pub fn validate_password_pair(password: &str, confirm: &str) -> Result<(), AppError> {
    if password.as_bytes() != confirm.as_bytes() {
        return Err(AppError::Validation("Passwords do not match.".to_string()));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Registration additionally requires an uppercase letter, a lowercase
/// letter, and a digit.
pub fn validate_password_composition(password: &str) -> Result<(), AppError> {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Password must include an uppercase letter, a lowercase letter, and a digit."
                .to_string(),
        ))
    }
}

/// Full registration check: pair rules plus composition.
pub fn validate_registration_password(password: &str, confirm: &str) -> Result<(), AppError> {
    validate_password_pair(password, confirm)?;
    validate_password_composition(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
        assert!(!valid_email("no-dot@example"));
    }

    #[test]
    fn mismatched_pair_is_rejected_before_length() {
        let err = validate_password_pair("Abcdefgh1234", "Abcdefgh1235").unwrap_err();
        assert_eq!(err.user_message(), "Passwords do not match.");
    }

    #[test]
    fn short_password_is_rejected_with_exact_message() {
        let err = validate_password_pair("short", "short").unwrap_err();
        assert_eq!(
            err.user_message(),
            "Password must be at least 12 characters long"
        );
    }

    #[test]
    fn eleven_characters_fail_twelve_pass() {
        assert!(validate_password_pair("Abcdefgh123", "Abcdefgh123").is_err());
        assert!(validate_password_pair("Abcdefgh1234", "Abcdefgh1234").is_ok());
    }

    #[test]
    fn registration_accepts_mixed_composition() {
        assert!(validate_registration_password("Abcdefgh1234", "Abcdefgh1234").is_ok());
    }

    #[test]
    fn registration_rejects_missing_character_classes() {
        // No digit, no uppercase, no lowercase in turn.
        assert!(validate_registration_password("Abcdefghijkl", "Abcdefghijkl").is_err());
        assert!(validate_registration_password("abcdefgh1234", "abcdefgh1234").is_err());
        assert!(validate_registration_password("ABCDEFGH1234", "ABCDEFGH1234").is_err());
    }

    #[test]
    fn confirmation_is_byte_exact() {
        // Same letters, different normalization forms must not match.
        assert!(validate_password_pair("Passw0rd\u{00e9}aaaa", "Passw0rde\u{0301}aaaa").is_err());
    }
}
