//! Configuration loading and path resolution.
//!
//! Supports HED_HOME env var override for testing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::parser::DEFAULT_CHUNK_SIZE;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Paths for hed data store.
#[derive(Debug, Clone)]
pub struct HedPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub history_file: PathBuf,
}

impl HedPaths {
    /// Build paths from base directory (e.g. ProjectDirs data dir or HED_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.toml"),
            history_file: base.join("history.json"),
            config_dir: base,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default hed paths (respects HED_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("HED_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("com", "hed", "hed") {
            dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".hed")
        };
        Self::from_base(base)
    }
}

/// Line ending used when writing the hosts file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    Crlf,
}

impl Default for LineEnding {
    fn default() -> Self {
        if cfg!(windows) {
            LineEnding::Crlf
        } else {
            LineEnding::Lf
        }
    }
}

impl LineEnding {
    /// Convert `\n`-terminated text to this line ending.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            LineEnding::Lf => Cow::Borrowed(text),
            LineEnding::Crlf => Cow::Owned(text.replace("\r\n", "\n").replace('\n', "\r\n")),
        }
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// Main config.toml structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hosts file to edit instead of the system one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts_file: Option<PathBuf>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub line_ending: LineEnding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_file: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            line_ending: LineEnding::default(),
        }
    }
}

/// Path to config.toml (respects HED_HOME).
pub fn config_path() -> PathBuf {
    HedPaths::default_paths().config_file
}

impl Config {
    /// Load config from paths (with shared lock when file exists).
    pub fn load(paths: &HedPaths) -> Result<Config> {
        if paths.config_file.is_file() {
            let mut file = fs::OpenOptions::new()
                .read(true)
                .open(&paths.config_file)
                .with_context(|| format!("open {}", paths.config_file.display()))?;
            fs2::FileExt::lock_shared(&file)?;
            let mut s = String::new();
            file.read_to_string(&mut s)?;
            let cfg: Config = toml::from_str(&s)
                .with_context(|| format!("parse {}", paths.config_file.display()))?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to paths (with exclusive lock). Creates parent dirs if needed.
    pub fn save(&self, paths: &HedPaths) -> Result<()> {
        if let Some(p) = paths.config_file.parent() {
            fs::create_dir_all(p)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&paths.config_file)
            .with_context(|| format!("open {}", paths.config_file.display()))?;
        fs2::FileExt::lock_exclusive(&file)?;
        let s = toml::to_string_pretty(self)?;
        file.write_all(s.as_bytes())?;
        Ok(())
    }
}
