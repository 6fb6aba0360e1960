//! Registry Process Commands
//!
//! Start, stop and inspect the Verdaccio child process.

use tauri::{AppHandle, State};
use tracing::warn;

use crate::domain::{LogEntry, LogSource, ServerStatus};
use crate::process::VerdaccioInstall;
use crate::AppState;

/// Start the registry on `port`, creating the config layout first
#[tauri::command]
pub async fn start_verdaccio(
    app: AppHandle,
    state: State<'_, AppState>,
    port: u16,
    allow_lan: bool,
) -> Result<ServerStatus, String> {
    state.config.ensure_layout().map_err(|e| e.to_string())?;

    let Some(install) = VerdaccioInstall::locate(&app) else {
        let message = "Verdaccio not found: install it under resources/node_modules";
        state.process.log(LogSource::Error, message);
        warn!("verdaccio entry not found");
        return Err(message.to_string());
    };

    state
        .process
        .start(&app, &install, &state.paths, port, allow_lan)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn stop_verdaccio(state: State<'_, AppState>) -> Result<(), String> {
    state.process.stop().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_verdaccio_status(state: State<'_, AppState>) -> Result<ServerStatus, String> {
    state.process.status(&state.paths).map_err(|e| e.to_string())
}

/// Whether a Verdaccio entry point can be found
#[tauri::command]
pub async fn check_verdaccio_installed(app: AppHandle) -> Result<bool, String> {
    Ok(VerdaccioInstall::locate(&app).is_some())
}

#[tauri::command]
pub async fn get_verdaccio_version(app: AppHandle) -> Result<String, String> {
    Ok(VerdaccioInstall::locate(&app)
        .map(|install| install.version())
        .unwrap_or_else(|| crate::process::UNKNOWN_VERSION.to_string()))
}

#[tauri::command]
pub async fn get_verdaccio_logs(state: State<'_, AppState>) -> Result<Vec<LogEntry>, String> {
    state.process.logs().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_verdaccio_logs(state: State<'_, AppState>) -> Result<(), String> {
    state.process.clear_logs().map_err(|e| e.to_string())
}
