//! Registry Process
//!
//! Owns the Verdaccio child process: spawning it under Node, draining its
//! output into the log buffer, and clearing state when it exits.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tauri::{AppHandle, Manager};
use tauri_plugin_shell::process::{CommandChild, CommandEvent};
use tauri_plugin_shell::ShellExt;
use tracing::{error, info, warn};

use crate::domain::{DomainError, DomainResult, LogBuffer, LogEntry, LogSource, ServerStatus, DEFAULT_PORT};
use crate::repository::{display_path, VerdaccioPaths};
use crate::tray;

/// Version reported when the bundled package cannot be read
pub const UNKNOWN_VERSION: &str = "unknown";

/// A Verdaccio package directory (`node_modules/verdaccio`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdaccioInstall {
    root: PathBuf,
}

impl VerdaccioInstall {
    /// Bundled resources first, then `resources/` under the working directory
    pub fn locate(app: &AppHandle) -> Option<Self> {
        let mut bases = Vec::new();
        match app.path().resource_dir() {
            Ok(dir) => bases.push(dir),
            Err(e) => warn!(error = %e, "resource directory unavailable"),
        }
        if let Ok(cwd) = std::env::current_dir() {
            bases.push(cwd.join("resources"));
        }
        Self::locate_in(&bases)
    }

    /// First base holding `node_modules/verdaccio/bin/verdaccio`
    pub fn locate_in(bases: &[PathBuf]) -> Option<Self> {
        bases
            .iter()
            .map(|base| Self { root: base.join("node_modules").join("verdaccio") })
            .find(|install| install.entry().is_file())
    }

    pub fn entry(&self) -> PathBuf {
        self.root.join("bin").join("verdaccio")
    }

    pub fn version(&self) -> String {
        read_version(&self.root.join("package.json")).unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }
}

fn read_version(package_json: &Path) -> Option<String> {
    let content = fs::read_to_string(package_json).ok()?;
    let doc: Value = serde_json::from_str(&content).ok()?;
    doc.get("version").and_then(Value::as_str).map(str::to_string)
}

/// `--listen` value; loopback unless LAN access is allowed
pub fn listen_address(port: u16, allow_lan: bool) -> String {
    let host = if allow_lan { "0.0.0.0" } else { "127.0.0.1" };
    format!("{}:{}", host, port)
}

struct ProcessState {
    child: Option<CommandChild>,
    port: u16,
    pid: Option<u32>,
    /// Bumped on every spawn so a late exit event cannot clear a newer child
    generation: u64,
}

/// Handle to the registry child process, shared through app state
pub struct VerdaccioProcess {
    state: Arc<Mutex<ProcessState>>,
    logs: Arc<Mutex<LogBuffer>>,
}

impl Default for VerdaccioProcess {
    fn default() -> Self {
        Self::new()
    }
}

impl VerdaccioProcess {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ProcessState {
                child: None,
                port: DEFAULT_PORT,
                pid: None,
                generation: 0,
            })),
            logs: Arc::new(Mutex::new(LogBuffer::default())),
        }
    }

    fn state(&self) -> DomainResult<MutexGuard<'_, ProcessState>> {
        self.state
            .lock()
            .map_err(|_| DomainError::Internal("process state lock poisoned".into()))
    }

    pub fn log(&self, source: LogSource, message: &str) {
        push_log(&self.logs, source, message);
    }

    pub fn logs(&self) -> DomainResult<Vec<LogEntry>> {
        self.logs
            .lock()
            .map(|logs| logs.snapshot())
            .map_err(|_| DomainError::Internal("log buffer lock poisoned".into()))
    }

    pub fn clear_logs(&self) -> DomainResult<()> {
        self.logs
            .lock()
            .map(|mut logs| logs.clear())
            .map_err(|_| DomainError::Internal("log buffer lock poisoned".into()))
    }

    pub fn is_running(&self) -> bool {
        self.state().map(|s| s.child.is_some()).unwrap_or(false)
    }

    pub fn status(&self, paths: &VerdaccioPaths) -> DomainResult<ServerStatus> {
        let state = self.state()?;
        Ok(ServerStatus {
            running: state.child.is_some(),
            port: state.port,
            pid: state.pid,
            storage_path: display_path(&paths.storage_dir()),
            config_path: display_path(&paths.config_file()),
        })
    }

    /// Spawn `node <entry> --config <config> --listen <host:port>`
    pub fn start(
        &self,
        app: &AppHandle,
        install: &VerdaccioInstall,
        paths: &VerdaccioPaths,
        port: u16,
        allow_lan: bool,
    ) -> DomainResult<ServerStatus> {
        let mut state = self.state()?;
        if state.child.is_some() {
            return Err(DomainError::Conflict("Verdaccio is already running".into()));
        }

        let entry = install.entry();
        let config = paths.config_file();
        let listen = listen_address(port, allow_lan);
        self.log(LogSource::Info, "Starting Verdaccio...");
        self.log(LogSource::Info, &format!("Entry: {}", entry.display()));
        self.log(LogSource::Info, &format!("Config: {}", config.display()));
        self.log(LogSource::Info, &format!("Listening on {}", listen));

        let args = [display_path(&entry), "--config".into(), display_path(&config), "--listen".into(), listen];
        let (rx, child) = app.shell().command("node").args(args).spawn().map_err(|e| {
            let message = format!("failed to start Verdaccio: {}", e);
            self.log(LogSource::Error, &message);
            DomainError::Internal(message)
        })?;

        let pid = child.pid();
        state.generation += 1;
        state.child = Some(child);
        state.port = port;
        state.pid = Some(pid);
        let generation = state.generation;
        drop(state);

        self.log(LogSource::Info, &format!("Verdaccio started, PID {}", pid));
        info!(pid, port, allow_lan, "registry started");
        self.watch(app.clone(), rx, generation);
        self.status(paths)
    }

    /// Drain child output until it exits
    fn watch(
        &self,
        app: AppHandle,
        mut rx: tauri::async_runtime::Receiver<CommandEvent>,
        generation: u64,
    ) {
        let state = Arc::clone(&self.state);
        let logs = Arc::clone(&self.logs);

        tauri::async_runtime::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    CommandEvent::Stdout(line) => push_output(&logs, LogSource::Stdout, &line),
                    CommandEvent::Stderr(line) => push_output(&logs, LogSource::Stderr, &line),
                    CommandEvent::Error(e) => {
                        error!(error = %e, "registry process error");
                        push_log(&logs, LogSource::Error, &format!("Process error: {}", e));
                    }
                    CommandEvent::Terminated(payload) => {
                        push_log(&logs, LogSource::Info, &format!("Verdaccio exited, code {:?}", payload.code));
                        info!(code = ?payload.code, "registry process exited");
                        let current = match state.lock() {
                            Ok(mut s) if s.generation == generation => {
                                s.child = None;
                                s.pid = None;
                                true
                            }
                            _ => false,
                        };
                        if current {
                            if let Err(e) = tray::set_running(&app, false) {
                                warn!(error = %e, "tray update failed");
                            }
                        }
                        break;
                    }
                    _ => {}
                }
            }
        });
    }

    /// Kill the child if there is one. Stopping a stopped registry is a no-op.
    pub fn stop(&self) -> DomainResult<()> {
        self.log(LogSource::Info, "Stopping Verdaccio...");
        let mut state = self.state()?;
        state.pid = None;
        let Some(child) = state.child.take() else {
            return Ok(());
        };
        drop(state);

        child.kill().map_err(|e| {
            let message = format!("failed to stop Verdaccio: {}", e);
            self.log(LogSource::Error, &message);
            DomainError::Internal(message)
        })?;
        self.log(LogSource::Info, "Verdaccio stopped");
        info!("registry stopped");
        Ok(())
    }

    /// Best-effort kill on app exit
    pub fn kill(&self) {
        if let Err(e) = self.stop() {
            warn!(error = %e, "registry kill on exit failed");
        }
    }
}

fn push_log(logs: &Mutex<LogBuffer>, source: LogSource, message: &str) {
    if let Ok(mut logs) = logs.lock() {
        logs.push(source, message);
    }
}

fn push_output(logs: &Mutex<LogBuffer>, source: LogSource, raw: &[u8]) {
    let text = String::from_utf8_lossy(raw);
    let line = text.trim();
    if !line.is_empty() {
        push_log(logs, source, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install_under(base: &Path, package_json: Option<&str>) {
        let root = base.join("node_modules").join("verdaccio");
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin").join("verdaccio"), "#!/usr/bin/env node\n").unwrap();
        if let Some(content) = package_json {
            fs::write(root.join("package.json"), content).unwrap();
        }
    }

    #[test]
    fn test_listen_address() {
        assert_eq!(listen_address(4873, false), "127.0.0.1:4873");
        assert_eq!(listen_address(8080, true), "0.0.0.0:8080");
    }

    #[test]
    fn test_locate_prefers_first_base_with_entry() {
        let bundled = TempDir::new().unwrap();
        let dev = TempDir::new().unwrap();
        install_under(dev.path(), Some(r#"{"version":"6.0.5"}"#));

        let bases = vec![bundled.path().to_path_buf(), dev.path().to_path_buf()];
        let install = VerdaccioInstall::locate_in(&bases).unwrap();
        assert!(install.entry().starts_with(dev.path()));
        assert_eq!(install.version(), "6.0.5");

        install_under(bundled.path(), None);
        let install = VerdaccioInstall::locate_in(&bases).unwrap();
        assert!(install.entry().starts_with(bundled.path()));
        assert_eq!(install.version(), UNKNOWN_VERSION);
    }

    #[test]
    fn test_locate_without_install() {
        let empty = TempDir::new().unwrap();
        assert!(VerdaccioInstall::locate_in(&[empty.path().to_path_buf()]).is_none());
    }

    #[test]
    fn test_idle_process_status_and_logs() {
        let home = TempDir::new().unwrap();
        let paths = VerdaccioPaths::under(home.path());
        let process = VerdaccioProcess::new();

        let status = process.status(&paths).unwrap();
        assert!(!status.running);
        assert_eq!(status.port, DEFAULT_PORT);
        assert!(status.pid.is_none());
        assert!(status.config_path.ends_with("config.yaml"));

        process.stop().unwrap();
        let logs = process.logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].level, "INFO");

        push_output(&process.logs, LogSource::Stdout, b"  \x1b[32mhttp\x1b[39m <-- 200\n");
        push_output(&process.logs, LogSource::Stderr, b"   \n");
        let logs = process.logs().unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].message, "http <-- 200");

        process.clear_logs().unwrap();
        assert!(process.logs().unwrap().is_empty());
    }
}
