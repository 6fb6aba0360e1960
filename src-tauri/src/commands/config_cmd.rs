//! Registry Config Commands
//!
//! `config.yaml` is read and written as plain text.

use tauri::State;

use crate::repository::display_path;
use crate::AppState;

#[tauri::command]
pub async fn get_verdaccio_config(state: State<'_, AppState>) -> Result<String, String> {
    state.config.read().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_verdaccio_config(state: State<'_, AppState>, config: String) -> Result<(), String> {
    state.config.save(&config).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_config_file_path(state: State<'_, AppState>) -> Result<String, String> {
    Ok(display_path(&state.config.path()))
}

#[tauri::command]
pub async fn reset_config_to_default(state: State<'_, AppState>) -> Result<(), String> {
    state.config.reset().map_err(|e| e.to_string())
}
