//! User Entity
//!
//! Registry accounts stored in an htpasswd file.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

pub const MIN_PASSWORD_LEN: usize = 4;

/// Registry user (hashes never leave the host)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub created: Option<String>,
}

impl UserInfo {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), created: None }
    }
}

/// Non-empty and free of the htpasswd separators
pub fn validate_username(username: &str) -> DomainResult<()> {
    if username.trim().is_empty() {
        return Err(DomainError::InvalidInput("username must not be empty".into()));
    }
    if username.contains(':') || username.contains('\n') || username.contains('\r') {
        return Err(DomainError::InvalidInput(
            "username must not contain ':' or line breaks".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.is_empty() {
        return Err(DomainError::InvalidInput("password must not be empty".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(matches!(validate_username(""), Err(DomainError::InvalidInput(_))));
        assert!(matches!(validate_username("a:b"), Err(DomainError::InvalidInput(_))));
        assert!(matches!(validate_username("a\nb"), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("abcd").is_ok());
        assert!(validate_password("abc").is_err());
        assert!(validate_password("").is_err());
        // Length counts characters, not bytes
        assert!(validate_password("äöü").is_err());
    }
}
