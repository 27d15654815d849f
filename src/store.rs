//! Data store operations and directory layout.

use anyhow::Result;

use crate::config::{Config, HedPaths};

/// Ensure the hed data directory exists.
pub fn ensure_dirs(paths: &HedPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.config_dir)?;
    Ok(())
}

/// Load config from store.
pub fn load_config(paths: &HedPaths) -> Result<Config> {
    Config::load(paths)
}

/// Save config to store.
pub fn save_config(paths: &HedPaths, config: &Config) -> Result<()> {
    ensure_dirs(paths)?;
    Config::save(config, paths)
}
