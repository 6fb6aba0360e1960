//! Frontend Errors
//!
//! Failures surfaced by the command bridge and by local form validation.

use thiserror::Error;

/// A failed host command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The host process could not be reached (no Tauri runtime, IPC failure)
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    /// The command ran and returned an error string
    #[error("{0}")]
    Rejected(String),
    /// The command answered with a value of the wrong shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// The raw message, as shown in notifications
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        BackendError::Decode(e.to_string())
    }
}

/// A local form constraint violation. Never reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username is required")]
    EmptyUsername,
    #[error("Username must not contain ':' or line breaks")]
    IllegalUsername,
    #[error("Password is required")]
    EmptyPassword,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Port must be a number between 1 and 65535")]
    InvalidPort,
}

/// Errors from a submitted form: either caught locally or rejected by the host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
