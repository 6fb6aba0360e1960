//! Settings Repository
//!
//! App preferences as pretty-printed JSON. A missing file means defaults.

use std::fs;
use std::path::PathBuf;

use crate::domain::{AppSettings, DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> DomainResult<AppSettings> {
        if !self.path.exists() {
            return Ok(AppSettings::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(DomainError::io(format!("reading {}", self.path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| DomainError::InvalidInput(format!("settings file is not valid: {}", e)))
    }

    pub fn save(&self, settings: &AppSettings) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(DomainError::io(format!("creating {}", parent.display())))?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content)
            .map_err(DomainError::io(format!("writing {}", self.path.display())))
    }
}
