//! Registry Config Commands
//!
//! Frontend bindings for reading and writing the registry's `config.yaml`.

use serde::Serialize;

use super::{Api, Bridge, NO_ARGS};
use crate::errors::BackendError;

#[derive(Serialize)]
struct SaveConfigArgs<'a> {
    config: &'a str,
}

impl<B: Bridge> Api<B> {
    pub async fn get_verdaccio_config(&self) -> Result<String, BackendError> {
        self.call("get_verdaccio_config", NO_ARGS).await
    }

    pub async fn save_verdaccio_config(&self, config: &str) -> Result<(), BackendError> {
        self.call_unit("save_verdaccio_config", &SaveConfigArgs { config }).await
    }

    pub async fn get_config_file_path(&self) -> Result<String, BackendError> {
        self.call("get_config_file_path", NO_ARGS).await
    }

    pub async fn reset_config_to_default(&self) -> Result<(), BackendError> {
        self.call_unit("reset_config_to_default", NO_ARGS).await
    }
}
