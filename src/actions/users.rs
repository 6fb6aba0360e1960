//! User Flows
//!
//! Forms are checked locally first; nothing reaches the backend until they pass.
//! The user list is only refreshed after a successful change.

use leptos::logging::log;

use crate::commands::{Api, Bridge};
use crate::errors::{BackendError, FormError};
use crate::models::UserAccount;
use crate::validation::{validate_password, NewUserForm};

pub async fn load_users<B: Bridge>(api: &Api<B>) -> Result<Vec<UserAccount>, BackendError> {
    api.get_users().await
}

/// Create the account and return the refreshed list
pub async fn add_user<B: Bridge>(api: &Api<B>, form: &NewUserForm) -> Result<Vec<UserAccount>, FormError> {
    form.validate()?;
    let username = form.username.trim();
    api.add_user(username, &form.password).await?;
    log!("[Users] added {}", username);
    Ok(api.get_users().await?)
}

pub async fn change_password<B: Bridge>(
    api: &Api<B>,
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<(), FormError> {
    validate_password(password, confirm)?;
    api.change_user_password(username, password).await?;
    Ok(())
}

pub async fn delete_user<B: Bridge>(api: &Api<B>, username: &str) -> Result<Vec<UserAccount>, BackendError> {
    api.delete_user(username).await?;
    log!("[Users] deleted {}", username);
    api.get_users().await
}
