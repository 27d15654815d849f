//! Hosts file snapshots taken before each write, newest first.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::config::HedPaths;
use crate::error::HedError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostHistory {
    /// RFC 3339 timestamp.
    pub created_at: String,
    pub content: String,
}

/// Snapshot log stored in history.json.
#[derive(Debug, Clone)]
pub struct History {
    paths: HedPaths,
    limit: usize,
}

impl History {
    pub fn new(paths: &HedPaths, limit: usize) -> Self {
        Self {
            paths: paths.clone(),
            limit,
        }
    }

    /// All snapshots, newest first.
    pub fn load(&self) -> Result<Vec<HostHistory>> {
        let path = &self.paths.history_file;
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let mut file = fs::OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("open {}", path.display()))?;
        fs2::FileExt::lock_shared(&file)?;
        let mut s = String::new();
        file.read_to_string(&mut s)?;
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
    }

    /// Record `content` as the newest snapshot. Returns false when it equals
    /// the current newest snapshot or the limit is zero.
    pub fn record(&self, content: &str) -> Result<bool> {
        if self.limit == 0 {
            return Ok(false);
        }
        self.update(|entries| {
            if entries.first().is_some_and(|e| e.content == content) {
                return false;
            }
            entries.insert(
                0,
                HostHistory {
                    created_at: chrono::Local::now().to_rfc3339(),
                    content: content.to_string(),
                },
            );
            true
        })
    }

    pub fn get(&self, index: usize) -> Result<HostHistory> {
        self.load()?
            .into_iter()
            .nth(index)
            .ok_or_else(|| HedError::HistoryEntryNotFound(index).into())
    }

    pub fn clear(&self) -> Result<()> {
        self.update(|entries| {
            entries.clear();
            true
        })?;
        Ok(())
    }

    /// Read-modify-write under an exclusive lock; truncates to the limit.
    fn update(&self, f: impl FnOnce(&mut Vec<HostHistory>) -> bool) -> Result<bool> {
        let path = &self.paths.history_file;
        if let Some(p) = path.parent() {
            fs::create_dir_all(p)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("open {}", path.display()))?;
        fs2::FileExt::lock_exclusive(&file)?;

        let mut s = String::new();
        file.read_to_string(&mut s)?;
        let mut entries: Vec<HostHistory> = if s.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?
        };

        let changed = f(&mut entries);
        entries.truncate(self.limit);

        let s = serde_json::to_string_pretty(&entries)?;
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(s.as_bytes())?;
        Ok(changed)
    }
}
