//! Windows hosts file access.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{read_hosts, system_hosts_path, HostsStore};

pub fn hosts_path() -> PathBuf {
    let drive = std::env::var("SYSTEMDRIVE").unwrap_or_else(|_| "C:".to_string());
    PathBuf::from(format!(r"{drive}\Windows\System32\drivers\etc\hosts"))
}

pub struct SystemHostsStore;

impl HostsStore for SystemHostsStore {
    fn read(&self) -> Result<String> {
        read_hosts(&system_hosts_path())
    }

    fn write(&self, content: &str) -> Result<()> {
        let path = system_hosts_path();
        std::fs::write(&path, content).with_context(|| {
            format!("Failed to write {} (run from an elevated prompt)", path.display())
        })
    }

    fn location(&self) -> String {
        system_hosts_path().display().to_string()
    }
}
