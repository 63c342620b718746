//! Registration and profile field rules.

use validator::ValidateEmail;

use crate::error::ValidationError;
use crate::validation::check_length;

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Username: 3 to 50 characters.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    check_length("username", username, 3, 50)
}

/// Email: a syntactically valid address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::Email)
    }
}

/// Password: at least [`MIN_PASSWORD_LEN`] characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        })
    } else {
        Ok(())
    }
}

/// Phone: 10 to 20 digits; `+`, spaces, dashes and parentheses are ignored.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let mut digits = 0usize;
    for c in phone.chars() {
        match c {
            '0'..='9' => digits += 1,
            '+' | ' ' | '-' | '(' | ')' => {}
            _ => return Err(ValidationError::Phone),
        }
    }
    if (10..=20).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::Phone)
    }
}
