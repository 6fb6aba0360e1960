//! Page Flows
//!
//! Multi-step backend sequences behind each page: the order of calls, what
//! is refreshed afterwards and what is left untouched on failure. Pages own
//! the signals; these functions only talk to [`Api`](crate::commands::Api).

pub mod config;
pub mod dashboard;
pub mod packages;
pub mod settings;
pub mod users;

use crate::errors::BackendError;
use crate::poller::{ActionGuard, GuardToken};

/// Claim `guard` for the duration of an action
fn claim(guard: &ActionGuard) -> Result<GuardToken, BackendError> {
    guard
        .hold()
        .ok_or_else(|| BackendError::Rejected("Another action is still running".to_string()))
}
