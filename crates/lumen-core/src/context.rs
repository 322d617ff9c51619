use crate::cache::Cache;
use crate::cloud::Cloud;
use crate::config::Config;
use crate::error::Result;
use crate::hub::{Hub, Session};
use crate::prompt::Prompt;
use crate::store::Store;
use chrono::{DateTime, Utc};

/// The collaborators a command invocation runs against.
pub struct Ports {
    pub store: Box<dyn Store>,
    pub hub: Box<dyn Hub>,
    pub cloud: Box<dyn Cloud>,
    pub prompt: Box<dyn Prompt>,
}

/// Everything a command sees during one invocation: the persisted state plus
/// the ports to reach the hub, the cloud account, the user and the disk.
pub struct Context {
    pub config: Config,
    pub cache: Cache,
    ports: Ports,
    clock: Box<dyn Fn() -> DateTime<Utc>>,
}

impl Context {
    /// Load config and cache through `ports.store`. Unreadable documents are
    /// logged and replaced by defaults so a corrupt file never blocks the palette.
    pub fn open(ports: Ports) -> Self {
        let config = ports.store.load_config().unwrap_or_else(|e| {
            tracing::warn!("error loading config, starting empty: {e}");
            Config::default()
        });
        let cache = ports.store.load_cache().unwrap_or_else(|e| {
            tracing::warn!("error loading cache, starting empty: {e}");
            Cache::default()
        });
        Self::with_state(ports, config, cache)
    }

    pub fn with_state(ports: Ports, config: Config, cache: Cache) -> Self {
        Self {
            config,
            cache,
            ports,
            clock: Box::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn hub(&self) -> &dyn Hub {
        self.ports.hub.as_ref()
    }

    pub fn cloud(&self) -> &dyn Cloud {
        self.ports.cloud.as_ref()
    }

    pub fn prompt(&self) -> &dyn Prompt {
        self.ports.prompt.as_ref()
    }

    pub fn session(&self) -> Result<Session> {
        Session::from_config(&self.config)
    }

    pub fn save_config(&self) -> Result<()> {
        self.ports.store.save_config(&self.config)
    }

    pub fn save_cache(&self) -> Result<()> {
        self.ports.store.save_cache(&self.cache)
    }

    /// Mark the cache stale and persist that, so the next read re-fetches.
    pub fn invalidate_cache(&mut self) -> Result<()> {
        self.cache.invalidate();
        self.save_cache()?;
        tracing::debug!("cleared cache");
        Ok(())
    }
}
