use crate::prompt::TerminalPrompt;
use anyhow::Context as _;
use lumen_core::cloud::HttpCloud;
use lumen_core::hub::HttpHub;
use lumen_core::paths;
use lumen_core::store::JsonStore;
use lumen_core::{Context, Ports};
use std::path::PathBuf;

/// Where state lives and which services to talk to, as resolved from flags
/// and environment.
#[derive(Debug, Clone)]
pub struct Options {
    pub data_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub discovery_url: String,
    pub cloud_url: String,
    pub assume_yes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    pub data: PathBuf,
    pub cache: PathBuf,
}

impl Dirs {
    pub fn config_file(&self) -> PathBuf {
        paths::config_path(&self.data)
    }

    pub fn cache_file(&self) -> PathBuf {
        paths::cache_path(&self.cache)
    }
}

impl Options {
    pub fn dirs(&self) -> anyhow::Result<Dirs> {
        let data = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => paths::default_data_dir().context("failed to resolve data directory")?,
        };
        let cache = match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => paths::default_cache_dir().context("failed to resolve cache directory")?,
        };
        Ok(Dirs { data, cache })
    }

    /// Build a `Context` over the real store, hub, cloud and terminal.
    pub fn open(&self) -> anyhow::Result<Context> {
        let dirs = self.dirs()?;
        tracing::debug!(
            config = %dirs.config_file().display(),
            cache = %dirs.cache_file().display(),
            "opening state"
        );

        let hub = HttpHub::new(self.discovery_url.as_str()).context("failed to build hub client")?;
        let cloud = HttpCloud::new(self.cloud_url.as_str()).context("failed to build cloud client")?;
        Ok(Context::open(Ports {
            store: Box::new(JsonStore::new(&dirs.data, &dirs.cache)),
            hub: Box::new(hub),
            cloud: Box::new(cloud),
            prompt: Box::new(TerminalPrompt::new(self.assume_yes)),
        }))
    }
}
