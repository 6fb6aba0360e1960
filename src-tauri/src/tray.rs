//! System Tray
//!
//! Tray icon with a Show/Quit menu. The tooltip mirrors registry status.

use tauri::menu::{Menu, MenuItem};
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tauri::{App, AppHandle, Manager};
use tracing::info;

use crate::AppState;

pub const TRAY_ID: &str = "main-tray";

const MENU_SHOW: &str = "show";
const MENU_QUIT: &str = "quit";

fn tooltip(running: bool) -> &'static str {
    if running {
        "Verdaccio: running"
    } else {
        "Verdaccio: stopped"
    }
}

/// Bring the main window back from the tray
pub fn show_main_window(app: &AppHandle) {
    if let Some(window) = app.get_webview_window("main") {
        let _ = window.unminimize();
        let _ = window.show();
        let _ = window.set_focus();
    }
}

/// Kill the registry and exit
fn quit(app: &AppHandle) {
    if let Some(state) = app.try_state::<AppState>() {
        state.process.kill();
    }
    info!("quitting from tray");
    app.exit(0);
}

pub fn build(app: &App) -> tauri::Result<()> {
    let show = MenuItem::with_id(app, MENU_SHOW, "Show", true, None::<&str>)?;
    let quit_item = MenuItem::with_id(app, MENU_QUIT, "Quit", true, None::<&str>)?;
    let menu = Menu::with_items(app, &[&show, &quit_item])?;

    let mut builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(tooltip(false))
        .on_menu_event(|app, event| match event.id.as_ref() {
            MENU_SHOW => show_main_window(app),
            MENU_QUIT => quit(app),
            _ => {}
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                show_main_window(tray.app_handle());
            }
        });
    if let Some(icon) = app.default_window_icon() {
        builder = builder.icon(icon.clone());
    }
    builder.build(app)?;
    Ok(())
}

/// Reflect registry status in the tray tooltip
pub fn set_running(app: &AppHandle, running: bool) -> tauri::Result<()> {
    if let Some(tray) = app.tray_by_id(TRAY_ID) {
        tray.set_tooltip(Some(tooltip(running)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_follows_status() {
        assert!(tooltip(true).ends_with("running"));
        assert!(tooltip(false).ends_with("stopped"));
    }
}
