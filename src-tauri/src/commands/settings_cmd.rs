//! App Settings Commands

use tauri::State;

use crate::domain::AppSettings;
use crate::AppState;

#[tauri::command]
pub async fn get_app_settings(state: State<'_, AppState>) -> Result<AppSettings, String> {
    state.settings.load().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_app_settings(state: State<'_, AppState>, settings: AppSettings) -> Result<(), String> {
    state.settings.save(&settings).map_err(|e| e.to_string())
}
