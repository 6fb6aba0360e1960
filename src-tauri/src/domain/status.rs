//! Server Status Entity

use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 4873;

/// Snapshot of the registry child process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub running: bool,
    /// Port of the running server, or of the last start attempt
    pub port: u16,
    pub pid: Option<u32>,
    pub storage_path: String,
    pub config_path: String,
}
