use crate::error::{LumenError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const APP_DIR: &str = "lumen";
pub const CONFIG_FILE: &str = "config.json";
pub const CACHE_FILE: &str = "cache.json";

pub const DEFAULT_DISCOVERY_URL: &str = "https://discovery.meethue.com/";
pub const DEFAULT_CLOUD_URL: &str = "https://account.meethue.com/api";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

pub fn cache_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(CACHE_FILE)
}

/// Default data directory: `$XDG_CONFIG_HOME/lumen`, else `~/.config/lumen`.
pub fn default_data_dir() -> Result<PathBuf> {
    xdg_or_home("XDG_CONFIG_HOME", ".config")
}

/// Default cache directory: `$XDG_CACHE_HOME/lumen`, else `~/.cache/lumen`.
pub fn default_cache_dir() -> Result<PathBuf> {
    xdg_or_home("XDG_CACHE_HOME", ".cache")
}

fn xdg_or_home(var: &str, fallback: &str) -> Result<PathBuf> {
    if let Some(base) = std::env::var_os(var).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(base).join(APP_DIR));
    }
    let home = home::home_dir().ok_or(LumenError::HomeNotFound)?;
    Ok(home.join(fallback).join(APP_DIR))
}
