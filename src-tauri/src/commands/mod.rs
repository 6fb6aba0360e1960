//! Commands Layer
//!
//! Tauri command handlers that bridge the frontend to the repositories
//! and the registry process.

mod config_cmd;
mod package_cmd;
mod settings_cmd;
mod system_cmd;
mod user_cmd;
mod verdaccio_cmd;

pub use config_cmd::*;
pub use package_cmd::*;
pub use settings_cmd::*;
pub use system_cmd::*;
pub use user_cmd::*;
pub use verdaccio_cmd::*;
