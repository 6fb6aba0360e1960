//! Registry Config Repository
//!
//! `config.yaml` is treated as opaque text; only its existence and the
//! bundled default are known here.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use super::paths::VerdaccioPaths;
use crate::domain::{DomainError, DomainResult};

/// Config written on first start and by "reset to default".
///
/// Paths are relative to the config file, so storage and htpasswd land next to it.
pub const DEFAULT_CONFIG: &str = r#"# Verdaccio configuration
storage: ./storage
auth:
  htpasswd:
    file: ./htpasswd
    max_users: -1
uplinks:
  npmjs:
    url: https://registry.npmjs.org/
    cache: true
packages:
  '@*/*':
    access: $all
    publish: $authenticated
    proxy: npmjs
  '**':
    access: $all
    publish: $authenticated
    proxy: npmjs
server:
  keepAliveTimeout: 60
middlewares:
  audit:
    enabled: true
log:
  type: stdout
  format: pretty
  level: http
"#;

#[derive(Debug, Clone)]
pub struct ConfigRepository {
    paths: VerdaccioPaths,
}

impl ConfigRepository {
    pub fn new(paths: VerdaccioPaths) -> Self {
        Self { paths }
    }

    pub fn path(&self) -> PathBuf {
        self.paths.config_file()
    }

    /// Create the registry and storage directories, and a default config if none exists
    pub fn ensure_layout(&self) -> DomainResult<()> {
        let storage = self.paths.storage_dir();
        fs::create_dir_all(&storage)
            .map_err(DomainError::io(format!("creating {}", storage.display())))?;

        let config = self.path();
        if !config.exists() {
            fs::write(&config, DEFAULT_CONFIG)
                .map_err(DomainError::io(format!("writing {}", config.display())))?;
            info!(path = %config.display(), "created default registry config");
        }
        Ok(())
    }

    pub fn read(&self) -> DomainResult<String> {
        let path = self.path();
        if !path.exists() {
            return Err(DomainError::NotFound(format!("config file {}", path.display())));
        }
        fs::read_to_string(&path).map_err(DomainError::io(format!("reading {}", path.display())))
    }

    /// Write `text` verbatim
    pub fn save(&self, text: &str) -> DomainResult<()> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(DomainError::io(format!("creating {}", parent.display())))?;
        }
        fs::write(&path, text).map_err(DomainError::io(format!("writing {}", path.display())))
    }

    pub fn reset(&self) -> DomainResult<()> {
        self.save(DEFAULT_CONFIG)?;
        info!("registry config reset to default");
        Ok(())
    }
}
