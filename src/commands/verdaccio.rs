//! Registry Process Commands
//!
//! Frontend bindings for starting, stopping and inspecting the registry.

use serde::Serialize;

use super::{Api, Bridge, NO_ARGS};
use crate::errors::BackendError;
use crate::models::{LogEntry, ServerStatus};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartArgs {
    port: u16,
    allow_lan: bool,
}

impl<B: Bridge> Api<B> {
    pub async fn start_verdaccio(&self, port: u16, allow_lan: bool) -> Result<ServerStatus, BackendError> {
        self.call("start_verdaccio", &StartArgs { port, allow_lan }).await
    }

    pub async fn stop_verdaccio(&self) -> Result<(), BackendError> {
        self.call_unit("stop_verdaccio", NO_ARGS).await
    }

    pub async fn get_verdaccio_status(&self) -> Result<ServerStatus, BackendError> {
        self.call("get_verdaccio_status", NO_ARGS).await
    }

    pub async fn check_verdaccio_installed(&self) -> Result<bool, BackendError> {
        self.call("check_verdaccio_installed", NO_ARGS).await
    }

    pub async fn get_verdaccio_version(&self) -> Result<String, BackendError> {
        self.call("get_verdaccio_version", NO_ARGS).await
    }

    pub async fn get_verdaccio_logs(&self) -> Result<Vec<LogEntry>, BackendError> {
        self.call("get_verdaccio_logs", NO_ARGS).await
    }

    pub async fn clear_verdaccio_logs(&self) -> Result<(), BackendError> {
        self.call_unit("clear_verdaccio_logs", NO_ARGS).await
    }
}
