//! Package Repository
//!
//! Packages are directories under storage holding a `package.json`
//! metadata document; scoped packages live one level down in `@scope/`.
//! Private/cached classification asks the running registry.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::registry_api::RegistryApi;
use crate::domain::{
    package_rel_path, DomainError, DomainResult, PackageInfo, PackageKind, Page, PageWindow,
};

/// A package directory found in storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPackage {
    pub name: String,
    pub dir: PathBuf,
}

#[derive(Clone)]
pub struct PackageRepository {
    storage: PathBuf,
    registry: Arc<dyn RegistryApi>,
}

fn is_package_dir(path: &Path) -> bool {
    path.is_dir() && path.join("package.json").is_file()
}

fn read_metadata(dir: &Path) -> DomainResult<Value> {
    let path = dir.join("package.json");
    let content = fs::read_to_string(&path).map_err(DomainError::io(format!("reading {}", path.display())))?;
    Ok(serde_json::from_str(&content)?)
}

impl PackageRepository {
    pub fn new(storage: impl Into<PathBuf>, registry: Arc<dyn RegistryApi>) -> Self {
        Self { storage: storage.into(), registry }
    }

    /// Every stored package, sorted by lowercase name
    pub fn scan(&self) -> DomainResult<Vec<StoredPackage>> {
        if !self.storage.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.storage)
            .map_err(DomainError::io(format!("reading {}", self.storage.display())))?;

        let mut found = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            if name.starts_with('@') {
                let Ok(scoped) = fs::read_dir(&path) else {
                    continue;
                };
                for inner in scoped.flatten() {
                    let inner_path = inner.path();
                    if is_package_dir(&inner_path) {
                        found.push(StoredPackage {
                            name: format!("{}/{}", name, inner.file_name().to_string_lossy()),
                            dir: inner_path,
                        });
                    }
                }
            } else if !name.starts_with('.') && is_package_dir(&path) {
                found.push(StoredPackage { name, dir: path });
            }
        }

        found.sort_by_cached_key(|p| p.name.to_lowercase());
        Ok(found)
    }

    /// Stored packages of `kind`, in scan order
    async fn of_kind(&self, port: u16, kind: PackageKind) -> DomainResult<Vec<StoredPackage>> {
        let all = self.scan()?;
        if kind == PackageKind::All {
            return Ok(all);
        }
        let private: HashSet<String> = self.registry.private_package_names(port).await?.into_iter().collect();
        let want_private = kind == PackageKind::Private;
        Ok(all
            .into_iter()
            .filter(|p| private.contains(&p.name) == want_private)
            .collect())
    }

    /// One page of `kind`. Only the page's own metadata files are read.
    pub async fn list(
        &self,
        port: u16,
        kind: PackageKind,
        page: usize,
        page_size: usize,
    ) -> DomainResult<Page<PackageInfo>> {
        let matching = self.of_kind(port, kind).await?;
        let window = PageWindow::new(page, page_size, matching.len())?;

        let items = matching[window.range()]
            .iter()
            .filter_map(|p| match read_metadata(&p.dir) {
                Ok(doc) => Some(PackageInfo::from_metadata(&p.name, &doc)),
                Err(e) => {
                    warn!(package = %p.name, error = %e, "skipping unreadable package");
                    None
                }
            })
            .collect();
        Ok(window.into_page(items))
    }

    pub async fn count(&self, port: u16, kind: PackageKind) -> DomainResult<usize> {
        Ok(self.of_kind(port, kind).await?.len())
    }

    pub fn delete(&self, name: &str) -> DomainResult<()> {
        let dir = self.storage.join(package_rel_path(name)?);
        if !dir.exists() {
            return Err(DomainError::NotFound(format!("package {}", name)));
        }
        fs::remove_dir_all(&dir).map_err(DomainError::io(format!("deleting {}", name)))?;
        info!(package = name, "package deleted");
        Ok(())
    }

    /// Delete every package of `kind`. Fails only when nothing could be removed.
    pub async fn delete_kind(&self, port: u16, kind: PackageKind) -> DomainResult<usize> {
        let targets = self.of_kind(port, kind).await?;
        let mut deleted = 0;
        let mut failures = Vec::new();

        for pkg in &targets {
            match fs::remove_dir_all(&pkg.dir) {
                Ok(()) => deleted += 1,
                Err(e) => failures.push(format!("{}: {}", pkg.name, e)),
            }
        }

        if deleted == 0 && !failures.is_empty() {
            return Err(DomainError::Internal(format!("delete failed: {}", failures.join(", "))));
        }
        if !failures.is_empty() {
            warn!(failed = failures.len(), "some packages could not be deleted");
        }
        info!(?kind, deleted, "bulk delete finished");
        Ok(deleted)
    }

    /// Registry metadata for `name`, falling back to the stored document
    pub async fn details(&self, port: u16, name: &str) -> DomainResult<Value> {
        match self.registry.package_document(port, name).await {
            Ok(Some(doc)) => return Ok(doc),
            Ok(None) => {}
            Err(e) => warn!(package = name, error = %e, "registry unavailable, reading storage"),
        }
        let dir = self.storage.join(package_rel_path(name)?);
        if !is_package_dir(&dir) {
            return Err(DomainError::NotFound(format!("package {}", name)));
        }
        read_metadata(&dir)
    }
}
