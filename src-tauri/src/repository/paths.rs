//! Filesystem Layout
//!
//! Where the registry and the console keep their files:
//! `~/.verdaccio/{config.yaml, storage/, htpasswd}` and
//! `~/.mint-verdaccio/settings.json`.

use std::path::{Path, PathBuf};

/// Resolved file locations. Tests point these at a temp directory.
#[derive(Debug, Clone)]
pub struct VerdaccioPaths {
    registry_dir: PathBuf,
    settings_file: PathBuf,
}

impl VerdaccioPaths {
    /// Layout under the user's home directory (`.` when it cannot be determined)
    pub fn from_home() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::under(&home)
    }

    /// Same layout under an arbitrary base directory
    pub fn under(base: &Path) -> Self {
        Self {
            registry_dir: base.join(".verdaccio"),
            settings_file: base.join(".mint-verdaccio").join("settings.json"),
        }
    }

    pub fn registry_dir(&self) -> &Path {
        &self.registry_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.registry_dir.join("config.yaml")
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.registry_dir.join("storage")
    }

    pub fn htpasswd_file(&self) -> PathBuf {
        self.registry_dir.join("htpasswd")
    }

    pub fn settings_file(&self) -> &Path {
        &self.settings_file
    }
}

/// Display form of a path for the UI
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
