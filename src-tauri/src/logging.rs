//! Host Logging
//!
//! `tracing` to stderr and to `console.log` in the app log directory.
//! The file starts over once it passes [`MAX_LOG_BYTES`]; the previous
//! generation is kept as `console.log.old`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::{DomainError, DomainResult};

const DEFAULT_FILTER: &str = "verdaccio_console_lib=info";
const LOG_FILE: &str = "console.log";
pub const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

/// Move `path` aside when it has grown past `limit`
fn rotate_if_large(path: &Path, limit: u64) -> DomainResult<()> {
    let Ok(meta) = fs::metadata(path) else {
        return Ok(());
    };
    if meta.len() <= limit {
        return Ok(());
    }
    let old = path.with_extension("log.old");
    fs::rename(path, &old).map_err(DomainError::io(format!("rotating {}", path.display())))
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init(log_dir: &Path) -> DomainResult<PathBuf> {
    fs::create_dir_all(log_dir).map_err(DomainError::io(format!("creating {}", log_dir.display())))?;
    let path = log_dir.join(LOG_FILE);
    rotate_if_large(&path, MAX_LOG_BYTES)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(DomainError::io(format!("opening {}", path.display())))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(|e| DomainError::Internal(format!("logger already initialized: {}", e)))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rotation_only_past_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(LOG_FILE);

        rotate_if_large(&path, 10).unwrap();
        assert!(!path.exists());

        fs::write(&path, "short").unwrap();
        rotate_if_large(&path, 10).unwrap();
        assert!(path.exists());

        fs::write(&path, "a line longer than ten bytes").unwrap();
        rotate_if_large(&path, 10).unwrap();
        assert!(!path.exists());
        assert!(dir.path().join("console.log.old").exists());
    }
}
