//! Frontend Models
//!
//! Data structures matching backend entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Registry server status snapshot (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub running: bool,
    pub port: u16,
    pub pid: Option<u32>,
    pub storage_path: String,
    pub config_path: String,
}

impl Default for ServerStatus {
    fn default() -> Self {
        Self {
            running: false,
            port: DEFAULT_PORT,
            pid: None,
            storage_path: String::new(),
            config_path: String::new(),
        }
    }
}

pub const DEFAULT_PORT: u16 = 4873;

/// Log line severity or stream.
///
/// The backend writes upper-case tags ("INFO", "STDOUT"); anything unknown is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Stdout,
    Stderr,
    Other(String),
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Stdout => "stdout",
            LogLevel::Stderr => "stderr",
            LogLevel::Other(s) => s,
        }
    }

    /// CSS modifier for the level badge
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Error | LogLevel::Stderr => "log-level error",
            LogLevel::Warn => "log-level warn",
            LogLevel::Info => "log-level info",
            LogLevel::Stdout => "log-level stdout",
            _ => "log-level muted",
        }
    }
}

impl From<String> for LogLevel {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            "stdout" => LogLevel::Stdout,
            "stderr" => LogLevel::Stderr,
            _ => LogLevel::Other(s),
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// One buffered registry log line (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Increasing per line; the row key
    #[serde(default)]
    pub seq: u64,
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// Package view selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    Private,
    Cached,
    All,
}

impl PackageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageKind::Private => "private",
            PackageKind::Cached => "cached",
            PackageKind::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PackageKind::Private => "Private packages",
            PackageKind::Cached => "Cached packages",
            PackageKind::All => "All packages",
        }
    }
}

/// Package summary (matches backend `PackageInfo`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    /// Latest version per dist-tags
    pub version: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub homepage: Option<String>,
    pub repository: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

/// One page of a server-side paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size,
            total_pages: 0,
        }
    }
}

/// Application preferences (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Launch the console at login
    pub auto_start: bool,
    /// Hide to tray instead of quitting when the window closes
    pub minimize_to_tray: bool,
    /// Start the registry when the console launches
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

/// Registry user (passwords are never read back)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub created: Option<String>,
}

/// The registry's YAML config as opaque text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    pub text: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parses_backend_tags() {
        let entry: LogEntry = serde_json::from_str(
            r#"{"seq":17,"timestamp":"2024-01-01 10:00:00.000","level":"STDERR","message":"boom"}"#,
        )
        .unwrap();
        assert_eq!(entry.level, LogLevel::Stderr);
        assert_eq!(entry.seq, 17);

        let odd: LogLevel = serde_json::from_str(r#""HTTP""#).unwrap();
        assert_eq!(odd, LogLevel::Other("HTTP".to_string()));
        assert_eq!(odd.as_str(), "HTTP");
    }

    #[test]
    fn test_settings_defaults_fill_missing_fields() {
        let settings: AppSettings = serde_json::from_str(
            r#"{"auto_start":true,"minimize_to_tray":false,"auto_start_verdaccio":false}"#,
        )
        .unwrap();
        assert_eq!(settings.default_port, DEFAULT_PORT);
        assert!(!settings.allow_lan);
        assert!(settings.auto_start);
    }

    #[test]
    fn test_package_kind_wire_form() {
        assert_eq!(serde_json::to_value(PackageKind::Cached).unwrap(), "cached");
        assert_eq!(PackageKind::All.as_str(), "all");
    }
}
