//! OS Integration Commands
//!
//! Auto-start at login, tray status and file-manager shortcuts.

use serde::Serialize;

use super::{Api, Bridge, NO_ARGS};
use crate::errors::BackendError;

#[derive(Serialize)]
struct EnableArgs {
    enable: bool,
}

#[derive(Serialize)]
struct RunningArgs {
    running: bool,
}

impl<B: Bridge> Api<B> {
    pub async fn set_auto_start(&self, enable: bool) -> Result<(), BackendError> {
        self.call_unit("set_auto_start", &EnableArgs { enable }).await
    }

    pub async fn get_auto_start_status(&self) -> Result<bool, BackendError> {
        self.call("get_auto_start_status", NO_ARGS).await
    }

    pub async fn sync_tray_status(&self, running: bool) -> Result<(), BackendError> {
        self.call_unit("sync_tray_status", &RunningArgs { running }).await
    }

    /// Reveal the registry storage directory in the system file manager
    pub async fn open_storage_dir(&self) -> Result<(), BackendError> {
        self.call_unit("open_storage_dir", NO_ARGS).await
    }
}
