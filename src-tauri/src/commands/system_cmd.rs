//! OS Integration Commands
//!
//! Login auto-start, tray status and opening storage in the file manager.

use tauri::{AppHandle, State};
use tauri_plugin_autostart::ManagerExt;
use tracing::info;

use crate::tray;
use crate::AppState;

#[tauri::command]
pub async fn set_auto_start(app: AppHandle, enable: bool) -> Result<(), String> {
    let launcher = app.autolaunch();
    let result = if enable { launcher.enable() } else { launcher.disable() };
    result.map_err(|e| format!("failed to update auto-start: {}", e))?;
    info!(enable, "auto-start updated");
    Ok(())
}

#[tauri::command]
pub async fn get_auto_start_status(app: AppHandle) -> Result<bool, String> {
    app.autolaunch()
        .is_enabled()
        .map_err(|e| format!("failed to read auto-start: {}", e))
}

#[tauri::command]
pub async fn sync_tray_status(app: AppHandle, running: bool) -> Result<(), String> {
    tray::set_running(&app, running).map_err(|e| e.to_string())
}

/// Open the storage directory, creating it if needed
#[tauri::command]
pub async fn open_storage_dir(state: State<'_, AppState>) -> Result<(), String> {
    state.config.ensure_layout().map_err(|e| e.to_string())?;
    open::that(state.paths.storage_dir()).map_err(|e| e.to_string())
}
