//! App Settings Entity

use serde::{Deserialize, Serialize};

use super::status::DEFAULT_PORT;

/// Console preferences, persisted as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Launch the console at login
    #[serde(default)]
    pub auto_start: bool,
    /// Hide to tray instead of quitting when the window closes
    #[serde(default = "default_true")]
    pub minimize_to_tray: bool,
    /// Start the registry when the console launches
    #[serde(default)]
    pub auto_start_verdaccio: bool,
    #[serde(default = "default_port")]
    pub default_port: u16,
    /// Listen on 0.0.0.0 instead of loopback
    #[serde(default)]
    pub allow_lan: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            auto_start: false,
            minimize_to_tray: true,
            auto_start_verdaccio: false,
            default_port: DEFAULT_PORT,
            allow_lan: false,
        }
    }
}
