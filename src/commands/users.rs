//! User Commands
//!
//! Frontend bindings for registry accounts (htpasswd).

use serde::Serialize;

use super::{Api, Bridge, NO_ARGS};
use crate::errors::BackendError;
use crate::models::UserAccount;

#[derive(Serialize)]
struct CredentialsArgs<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct UsernameArgs<'a> {
    username: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordArgs<'a> {
    username: &'a str,
    new_password: &'a str,
}

impl<B: Bridge> Api<B> {
    pub async fn get_users(&self) -> Result<Vec<UserAccount>, BackendError> {
        self.call("get_users", NO_ARGS).await
    }

    pub async fn add_user(&self, username: &str, password: &str) -> Result<(), BackendError> {
        self.call_unit("add_user", &CredentialsArgs { username, password }).await
    }

    pub async fn delete_user(&self, username: &str) -> Result<(), BackendError> {
        self.call_unit("delete_user", &UsernameArgs { username }).await
    }

    pub async fn change_user_password(&self, username: &str, new_password: &str) -> Result<(), BackendError> {
        self.call_unit("change_user_password", &ChangePasswordArgs { username, new_password }).await
    }

    pub async fn get_user_count(&self) -> Result<usize, BackendError> {
        self.call("get_user_count", NO_ARGS).await
    }
}
