//! Dashboard Flows
//!
//! Overview refresh and the start/stop/launch sequences. Every state change
//! is followed by exactly one tray sync and one overview refresh.

use leptos::logging::{log, warn};

use super::claim;
use crate::commands::{Api, Bridge};
use crate::errors::BackendError;
use crate::models::{AppSettings, PackageKind, ServerStatus, DEFAULT_PORT};
use crate::poller::ActionGuard;

/// Everything the dashboard cards show
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overview {
    pub status: ServerStatus,
    /// Port of the running server, or the configured default when stopped
    pub port: u16,
    /// Read only while the server is stopped
    pub settings: Option<AppSettings>,
    /// `None` while stopped or when the registry could not be asked
    pub private_count: Option<usize>,
    pub cached_count: Option<usize>,
    pub user_count: Option<usize>,
}

impl Overview {
    /// Port and LAN flag for the next start
    pub fn launch_params(&self) -> (u16, bool) {
        self.settings
            .as_ref()
            .map(|s| (s.default_port, s.allow_lan))
            .unwrap_or((DEFAULT_PORT, false))
    }
}

/// Status, then port source, then package counts (only while running), then users
pub async fn load_overview<B: Bridge>(api: &Api<B>) -> Result<Overview, BackendError> {
    let status = api.get_verdaccio_status().await?;

    let (port, settings) = if status.running {
        (status.port, None)
    } else {
        let settings = api.get_app_settings().await?;
        (settings.default_port, Some(settings))
    };

    let (private_count, cached_count) = if status.running {
        let private = api.get_package_count(port, PackageKind::Private).await;
        let cached = api.get_package_count(port, PackageKind::Cached).await;
        (private.ok(), cached.ok())
    } else {
        (None, None)
    };

    let user_count = api.get_user_count().await.ok();

    Ok(Overview {
        status,
        port,
        settings,
        private_count,
        cached_count,
        user_count,
    })
}

/// Scheduled refresh.
///
/// `Ok(None)` when skipped because an action or another refresh is in flight,
/// or when a start/stop began while this one was loading; its snapshot would
/// be older than the action's own.
pub async fn refresh_overview<B: Bridge>(
    api: &Api<B>,
    guard: &ActionGuard,
) -> Result<Option<Overview>, BackendError> {
    let Some(ticket) = guard.begin_refresh() else {
        return Ok(None);
    };
    let overview = load_overview(api).await?;
    if !ticket.is_current() {
        log!("[Dashboard] dropping refresh overtaken by an action");
        return Ok(None);
    }
    Ok(Some(overview))
}

/// Start the registry, sync the tray, then refresh.
///
/// `guard` stays busy until the refreshed overview is in hand, so a poll tick
/// cannot land in between.
pub async fn start_server<B: Bridge>(
    api: &Api<B>,
    guard: &ActionGuard,
    port: u16,
    allow_lan: bool,
) -> Result<Overview, BackendError> {
    let _busy = claim(guard)?;
    let status = api.start_verdaccio(port, allow_lan).await?;
    log!("[Dashboard] registry started on port {}", status.port);
    sync_tray(api, true).await;
    load_overview(api).await
}

pub async fn stop_server<B: Bridge>(api: &Api<B>, guard: &ActionGuard) -> Result<Overview, BackendError> {
    let _busy = claim(guard)?;
    api.stop_verdaccio().await?;
    log!("[Dashboard] registry stopped");
    sync_tray(api, false).await;
    load_overview(api).await
}

/// Launch-time check: start the registry when the user asked for it.
///
/// Returns the new status when a start happened. The tray is synced with the
/// real state either way.
pub async fn auto_start_on_launch<B: Bridge>(api: &Api<B>) -> Result<Option<ServerStatus>, BackendError> {
    let settings = api.get_app_settings().await?;
    let status = api.get_verdaccio_status().await?;

    if status.running || !settings.auto_start_verdaccio {
        sync_tray(api, status.running).await;
        return Ok(None);
    }

    let started = api.start_verdaccio(settings.default_port, settings.allow_lan).await?;
    log!("[Launch] auto-started registry on port {}", started.port);
    sync_tray(api, true).await;
    Ok(Some(started))
}

/// The tray indicator is cosmetic; a failed sync never fails the action
async fn sync_tray<B: Bridge>(api: &Api<B>, running: bool) {
    if let Err(e) = api.sync_tray_status(running).await {
        warn!("[Dashboard] tray sync failed: {}", e);
    }
}
