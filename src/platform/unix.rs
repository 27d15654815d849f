//! Unix (macOS, Linux) hosts file access.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use super::{read_hosts, system_hosts_path, HostsStore};

pub fn hosts_path() -> PathBuf {
    PathBuf::from("/etc/hosts")
}

pub struct SystemHostsStore;

impl HostsStore for SystemHostsStore {
    fn read(&self) -> Result<String> {
        read_hosts(&system_hosts_path())
    }

    fn write(&self, content: &str) -> Result<()> {
        let path = system_hosts_path();
        match std::fs::write(&path, content) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                tracing::warn!("no write access to {}, retrying with pkexec", path.display());
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to write {}", path.display())),
        }

        // Created exclusively with mode 0600; removed on drop.
        let mut temp = tempfile::NamedTempFile::new().context("create temp hosts file")?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        let status = Command::new("pkexec")
            .arg("cp")
            .arg(temp.path())
            .arg(&path)
            .status()
            .context("pkexec cp hosts")?;
        if !status.success() {
            anyhow::bail!("Failed to copy new hosts file to {}", path.display());
        }
        Ok(())
    }

    fn location(&self) -> String {
        system_hosts_path().display().to_string()
    }
}
