use crate::cache::Cache;
use crate::config::Config;
use crate::error::Result;
use crate::{io, paths};
use std::path::{Path, PathBuf};

/// Persistence port for the two on-disk documents.
pub trait Store {
    fn load_config(&self) -> Result<Config>;
    fn save_config(&self, config: &Config) -> Result<()>;
    fn load_cache(&self) -> Result<Cache>;
    fn save_cache(&self, cache: &Cache) -> Result<()>;
}

/// Whole-file JSON documents under the data and cache directories.
#[derive(Debug, Clone)]
pub struct JsonStore {
    config_path: PathBuf,
    cache_path: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: &Path, cache_dir: &Path) -> Self {
        Self {
            config_path: paths::config_path(data_dir),
            cache_path: paths::cache_path(cache_dir),
        }
    }
}

impl Store for JsonStore {
    fn load_config(&self) -> Result<Config> {
        io::load_json(&self.config_path)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        io::save_json(&self.config_path, config)
    }

    fn load_cache(&self) -> Result<Cache> {
        io::load_json(&self.cache_path)
    }

    fn save_cache(&self, cache: &Cache) -> Result<()> {
        io::save_json(&self.cache_path, cache)
    }
}
