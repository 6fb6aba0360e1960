//! Verdaccio Console Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Registry files and the registry HTTP API
//! - process: The Verdaccio child process
//! - commands: Tauri command handlers

use std::sync::Arc;

use tauri::{Manager, WindowEvent};
use tracing::{error, info, warn};

mod commands;
mod domain;
mod logging;
mod process;
mod repository;
mod tray;

use process::VerdaccioProcess;
use repository::{
    ConfigRepository, HtpasswdRepository, HttpRegistry, PackageRepository, SettingsRepository,
    VerdaccioPaths,
};

/// Flag the OS auto-start entry launches with
const MINIMIZED_FLAG: &str = "--minimized";

/// Application state shared across commands
pub struct AppState {
    pub paths: VerdaccioPaths,
    pub process: VerdaccioProcess,
    pub config: ConfigRepository,
    pub settings: SettingsRepository,
    pub users: HtpasswdRepository,
    pub packages: PackageRepository,
}

impl AppState {
    fn new(paths: VerdaccioPaths, registry: HttpRegistry) -> Self {
        Self {
            process: VerdaccioProcess::new(),
            config: ConfigRepository::new(paths.clone()),
            settings: SettingsRepository::new(paths.settings_file()),
            users: HtpasswdRepository::new(paths.htpasswd_file()),
            packages: PackageRepository::new(paths.storage_dir(), Arc::new(registry)),
            paths,
        }
    }
}

fn launched_minimized() -> bool {
    std::env::args().any(|arg| arg == MINIMIZED_FLAG)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let result = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            // A second launch brings the running console forward
            tray::show_main_window(app);
        }))
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_autostart::init(
            tauri_plugin_autostart::MacosLauncher::LaunchAgent,
            Some(vec![MINIMIZED_FLAG]),
        ))
        .setup(|app| {
            let log_dir = app.path().app_log_dir()?;
            match logging::init(&log_dir) {
                Ok(path) => info!(path = %path.display(), "logging initialized"),
                Err(e) => eprintln!("logging unavailable: {}", e),
            }

            let registry = HttpRegistry::new()?;
            app.manage(AppState::new(VerdaccioPaths::from_home(), registry));

            tray::build(app)?;

            if launched_minimized() {
                info!("started minimized");
            } else {
                tray::show_main_window(app.handle());
            }
            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::CloseRequested { api, .. } = event {
                let to_tray = window
                    .try_state::<AppState>()
                    .map(|state| match state.settings.load() {
                        Ok(settings) => settings.minimize_to_tray,
                        Err(e) => {
                            warn!(error = %e, "settings unreadable, hiding to tray");
                            true
                        }
                    })
                    .unwrap_or(true);

                if to_tray {
                    api.prevent_close();
                    let _ = window.hide();
                } else if let Some(state) = window.try_state::<AppState>() {
                    state.process.kill();
                }
            }
        })
        .invoke_handler(tauri::generate_handler![
            // Registry process
            commands::start_verdaccio,
            commands::stop_verdaccio,
            commands::get_verdaccio_status,
            commands::check_verdaccio_installed,
            commands::get_verdaccio_version,
            commands::get_verdaccio_logs,
            commands::clear_verdaccio_logs,
            // Registry config
            commands::get_verdaccio_config,
            commands::save_verdaccio_config,
            commands::get_config_file_path,
            commands::reset_config_to_default,
            // Packages
            commands::get_packages,
            commands::get_package_count,
            commands::delete_package,
            commands::delete_packages,
            commands::get_package_details,
            // App settings
            commands::get_app_settings,
            commands::save_app_settings,
            // OS integration
            commands::set_auto_start,
            commands::get_auto_start_status,
            commands::sync_tray_status,
            commands::open_storage_dir,
            // Users
            commands::get_users,
            commands::add_user,
            commands::delete_user,
            commands::change_user_password,
            commands::get_user_count,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        error!(error = %e, "error while running tauri application");
        std::process::exit(1);
    }
}
