//! Settings Commands
//!
//! Frontend bindings for the console's own preferences.

use serde::Serialize;

use super::{Api, Bridge, NO_ARGS};
use crate::errors::BackendError;
use crate::models::AppSettings;

#[derive(Serialize)]
struct SaveSettingsArgs<'a> {
    settings: &'a AppSettings,
}

impl<B: Bridge> Api<B> {
    pub async fn get_app_settings(&self) -> Result<AppSettings, BackendError> {
        self.call("get_app_settings", NO_ARGS).await
    }

    pub async fn save_app_settings(&self, settings: &AppSettings) -> Result<(), BackendError> {
        self.call_unit("save_app_settings", &SaveSettingsArgs { settings }).await
    }
}
