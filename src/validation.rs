//! Form Validation
//!
//! Local field checks run before anything is sent to the backend.

use crate::errors::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 4;

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if username.contains(':') || username.contains('\n') || username.contains('\r') {
        return Err(ValidationError::IllegalUsername);
    }
    Ok(())
}

pub fn validate_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Parse a port field; 0 and anything outside u16 are rejected
pub fn parse_port(input: &str) -> Result<u16, ValidationError> {
    match input.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(ValidationError::InvalidPort),
        Ok(port) => Ok(port),
    }
}

/// Add-user form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUserForm {
    pub username: String,
    pub password: String,
    pub confirm: String,
}

impl NewUserForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_username(&self.username)?;
        validate_password(&self.password, &self.confirm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert_eq!(validate_username(""), Err(ValidationError::EmptyUsername));
        assert_eq!(validate_username("  "), Err(ValidationError::EmptyUsername));
        assert_eq!(validate_username("a:b"), Err(ValidationError::IllegalUsername));
        assert_eq!(validate_username("a\nb"), Err(ValidationError::IllegalUsername));
        assert!(validate_username("alice").is_ok());
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password("", ""), Err(ValidationError::EmptyPassword));
        assert_eq!(
            validate_password("abc", "abc"),
            Err(ValidationError::PasswordTooShort { min: 4 })
        );
        assert_eq!(validate_password("abcd", "abce"), Err(ValidationError::PasswordMismatch));
        assert!(validate_password("abcd", "abcd").is_ok());
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("4873"), Ok(4873));
        assert_eq!(parse_port(" 8080 "), Ok(8080));
        assert_eq!(parse_port("0"), Err(ValidationError::InvalidPort));
        assert_eq!(parse_port("65536"), Err(ValidationError::InvalidPort));
        assert_eq!(parse_port("http"), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn test_form_reports_first_problem() {
        let form = NewUserForm {
            username: String::new(),
            password: "x".into(),
            confirm: "y".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::EmptyUsername));
    }
}
