//! Repository Layer
//!
//! File and HTTP access for everything the console manages.

mod config_repo;
mod htpasswd_repo;
mod package_repo;
mod paths;
mod registry_api;
mod settings_repo;


pub use config_repo::{ConfigRepository, DEFAULT_CONFIG};
pub use htpasswd_repo::{Htpasswd, HtpasswdRepository};
pub use package_repo::{PackageRepository, StoredPackage};
pub use paths::{display_path, VerdaccioPaths};
pub use registry_api::{HttpRegistry, RegistryApi};
pub use settings_repo::SettingsRepository;
