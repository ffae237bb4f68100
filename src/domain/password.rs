use std::borrow::Cow;

use validator::ValidationError;
use zxcvbn::zxcvbn;

const MIN_LENGTH: usize = 8;
const MIN_STRENGTH_SCORE: u8 = 3;
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.?/~";

/// Password rules without user context, used as a `validator` custom check.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    validate_password_with_context(password, &[])
}

/// Full password check. `user_inputs` (email, display name) are penalized by
/// zxcvbn so a password built from them scores as weak.
pub fn validate_password_with_context(password: &str, user_inputs: &[&str]) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(password_error(
            "password_length",
            format!("Must be at least {} characters", MIN_LENGTH),
        ));
    }

    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| SYMBOLS.contains(c));

    if !(has_upper && has_digit && has_symbol) {
        return Err(password_error(
            "password_complexity",
            "Must include uppercase, number, and symbol".to_string(),
        ));
    }

    let estimate = zxcvbn(password, user_inputs);
    if (estimate.score() as u8) < MIN_STRENGTH_SCORE {
        let feedback = estimate
            .feedback()
            .and_then(|f| f.warning().map(|w| w.to_string()))
            .unwrap_or_else(|| "Password is too easy to guess".to_string());

        return Err(password_error("password_strength", feedback));
    }

    Ok(())
}

fn password_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_passwords() {
        let err = validate_password_strength("Ab1!").unwrap_err();
        assert_eq!(err.code, "password_length");
    }

    #[test]
    fn rejects_missing_character_classes() {
        let err = validate_password_strength("alllowercase123!").unwrap_err();
        assert_eq!(err.code, "password_complexity");
    }

    #[test]
    fn accepts_strong_password() {
        assert!(validate_password_strength("vK7#pQz!Lm2@Rw9x").is_ok());
    }

    #[test]
    fn penalizes_passwords_built_from_user_inputs() {
        let err = validate_password_with_context("Adaeze2024!", &["adaeze@example.com", "Adaeze"]);
        assert!(err.is_err());
    }
}
