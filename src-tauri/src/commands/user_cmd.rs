//! Registry User Commands
//!
//! Accounts in the htpasswd file. Hashing runs on the blocking pool.

use tauri::State;

use crate::domain::{DomainResult, UserInfo};
use crate::repository::HtpasswdRepository;
use crate::AppState;

/// Run a hashing operation off the async workers
async fn blocking<T: Send + 'static>(
    repo: &HtpasswdRepository,
    op: impl FnOnce(&HtpasswdRepository) -> DomainResult<T> + Send + 'static,
) -> Result<T, String> {
    let repo = repo.clone();
    tauri::async_runtime::spawn_blocking(move || op(&repo))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_users(state: State<'_, AppState>) -> Result<Vec<UserInfo>, String> {
    state.users.list().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn add_user(state: State<'_, AppState>, username: String, password: String) -> Result<(), String> {
    blocking(&state.users, move |repo| repo.add(&username, &password)).await
}

#[tauri::command]
pub async fn delete_user(state: State<'_, AppState>, username: String) -> Result<(), String> {
    state.users.delete(&username).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn change_user_password(
    state: State<'_, AppState>,
    username: String,
    new_password: String,
) -> Result<(), String> {
    blocking(&state.users, move |repo| repo.change_password(&username, &new_password)).await
}

#[tauri::command]
pub async fn get_user_count(state: State<'_, AppState>) -> Result<usize, String> {
    state.users.count().map_err(|e| e.to_string())
}
