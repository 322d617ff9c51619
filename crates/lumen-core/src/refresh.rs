//! Staleness gate in front of every read-path command.

use crate::context::Context;
use crate::error::Result;

/// Counts of what a refresh brought back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub lights: usize,
    pub scenes: usize,
    pub groups: usize,
}

/// Refresh the cache if it is older than the staleness window.
/// Returns `Some` when a refresh happened.
pub fn ensure_fresh(ctx: &mut Context) -> Result<Option<RefreshSummary>> {
    let now = ctx.now();
    if !ctx.cache.is_stale(now) {
        return Ok(None);
    }
    tracing::debug!(age_secs = ctx.cache.age(now).num_seconds(), "cache is stale");
    refresh(ctx).map(Some)
}

/// Fetch lights, scenes and groups from the hub and persist them.
///
/// All three fetches must succeed before anything changes; on error the
/// in-memory cache, its timestamp and the cache file are left untouched.
pub fn refresh(ctx: &mut Context) -> Result<RefreshSummary> {
    let session = ctx.session()?;
    let hub = ctx.hub();
    let lights = hub.lights(&session)?;
    let scenes = hub.scenes(&session)?;
    let groups = hub.groups(&session)?;

    let summary = RefreshSummary {
        lights: lights.len(),
        scenes: scenes.len(),
        groups: groups.len(),
    };
    let now = ctx.now();
    ctx.cache.replace(now, lights, scenes, groups);
    ctx.save_cache()?;
    tracing::debug!(?summary, "refreshed cache");
    Ok(summary)
}
