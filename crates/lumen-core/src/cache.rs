use crate::types::{CloudScene, Group, Light, Scene};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cached data older than this is re-fetched before a read-path command answers.
pub const STALE_AFTER_SECS: i64 = 60;

/// Local snapshot of hub data.
///
/// Maps are keyed by hub id. `last_update` at the epoch marks the snapshot as
/// invalidated; the next read forces a refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cache {
    #[serde(default)]
    pub last_update: DateTime<Utc>,
    #[serde(default)]
    pub lights: BTreeMap<String, Light>,
    #[serde(default)]
    pub scenes: BTreeMap<String, Scene>,
    #[serde(default)]
    pub groups: BTreeMap<String, Group>,
    #[serde(default)]
    pub cloud_scenes: BTreeMap<String, CloudScene>,
}

impl Cache {
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_update
    }

    /// Stale past the window, or when `last_update` lies in the future.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        let age = self.age(now);
        age < Duration::zero() || age > Duration::seconds(STALE_AFTER_SECS)
    }

    /// Reset the timestamp so the next read re-fetches from the hub.
    pub fn invalidate(&mut self) {
        self.last_update = DateTime::<Utc>::default();
    }

    /// Replace the hub-sourced maps wholesale. Downloaded cloud scenes are kept.
    pub fn replace(
        &mut self,
        now: DateTime<Utc>,
        lights: BTreeMap<String, Light>,
        scenes: BTreeMap<String, Scene>,
        groups: BTreeMap<String, Group>,
    ) {
        self.last_update = now;
        self.lights = lights;
        self.scenes = scenes;
        self.groups = groups;
    }

    /// Names of the given light ids, skipping ids the cache does not know.
    pub fn light_names(&self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.lights.get(id))
            .map(|l| l.name.clone())
            .collect()
    }

    pub fn has_scenes(&self) -> bool {
        !self.scenes.is_empty() || !self.cloud_scenes.is_empty()
    }
}
