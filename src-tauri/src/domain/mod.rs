//! Domain Layer
//!
//! Contains all domain entities and core rules.
//! This layer does no I/O.

mod entity;
mod log;
mod package;
mod settings;
mod status;
mod user;

pub use entity::{DomainError, DomainResult};
pub use log::{strip_ansi, LogBuffer, LogEntry, LogSource, MAX_LOG_ENTRIES};
pub use package::{package_rel_path, version_compare, PackageInfo, PackageKind, Page, PageWindow};
pub use settings::AppSettings;
pub use status::{ServerStatus, DEFAULT_PORT};
pub use user::{validate_password, validate_username, UserInfo, MIN_PASSWORD_LEN};
