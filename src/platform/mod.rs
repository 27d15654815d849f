//! Platform abstraction for hosts file access.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

use crate::config::Config;

/// Trait for reading and writing a hosts file.
pub trait HostsStore: Send + Sync {
    /// Read the whole hosts file.
    fn read(&self) -> Result<String>;
    /// Replace the whole hosts file.
    fn write(&self, content: &str) -> Result<()>;
    /// Human-readable location (for `hed path` and messages).
    fn location(&self) -> String;
}

/// Path of the OS hosts file.
pub fn system_hosts_path() -> PathBuf {
    #[cfg(unix)]
    return unix::hosts_path();

    #[cfg(windows)]
    return windows::hosts_path();
}

/// Resolve the hosts store: explicit path, then HED_HOSTS_FILE, then
/// `hosts_file` from config, then the platform store.
pub fn default_hosts_store(explicit: Option<&Path>, config: &Config) -> Box<dyn HostsStore> {
    if let Some(path) = explicit {
        return Box::new(FileHostsStore::new(path));
    }
    if let Ok(path) = std::env::var("HED_HOSTS_FILE") {
        return Box::new(FileHostsStore::new(path));
    }
    if let Some(path) = &config.hosts_file {
        return Box::new(FileHostsStore::new(path));
    }
    #[cfg(unix)]
    return Box::new(unix::SystemHostsStore);

    #[cfg(windows)]
    return Box::new(windows::SystemHostsStore);
}

/// HostsStore that reads/writes a file at the given path.
#[derive(Clone)]
pub struct FileHostsStore {
    path: PathBuf,
}

impl FileHostsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HostsStore for FileHostsStore {
    fn read(&self) -> Result<String> {
        read_hosts(&self.path)
    }

    /// Write to a temp file next to the target and rename it over the target,
    /// keeping the target's permissions.
    fn write(&self, content: &str) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(p) => {
                std::fs::create_dir_all(p)?;
                p
            }
            None => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        if let Ok(meta) = std::fs::metadata(&self.path) {
            std::fs::set_permissions(tmp.path(), meta.permissions())
                .context("set temp file permissions")?;
        }
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Read a hosts file; a missing file reads as empty.
pub(crate) fn read_hosts(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(s),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}
