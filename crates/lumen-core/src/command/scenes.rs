use super::{Command, Query};
use crate::context::Context;
use crate::error::{LumenError, Result};
use crate::menu::{fuzzy_matches, sort_by_title, ItemArg, MenuItem};
use crate::refresh;
use crate::types::{CloudScene, Scene};
use std::collections::BTreeSet;

pub const KEY: &str = "scenes";

pub struct ScenesCommand;

impl Command for ScenesCommand {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self, _ctx: &Context) -> String {
        "Activate a scene".to_string()
    }

    fn enabled(&self, ctx: &Context) -> bool {
        ctx.config.is_paired() && ctx.cache.has_scenes()
    }

    fn list(&self, ctx: &mut Context, query: &Query) -> Result<Vec<MenuItem>> {
        refresh::ensure_fresh(ctx)?;

        let mut items = Vec::new();
        for scene in visible_scenes(ctx.cache.scenes.values()) {
            if !fuzzy_matches(&scene.short_name, &query.text) {
                continue;
            }
            items.push(
                MenuItem::new(scene.short_name.clone())
                    .subtitle(ctx.cache.light_names(&scene.lights).join(", "))
                    .autocomplete(scene.short_name.clone())
                    .arg(ItemArg::action(KEY, scene.id.clone())),
            );
        }
        for scene in ctx.cache.cloud_scenes.values() {
            let haystack = format!("{} {}", scene.category, scene.name);
            if !fuzzy_matches(&haystack, &query.text) {
                continue;
            }
            items.push(
                MenuItem::new(scene.name.clone())
                    .subtitle(format!("{} (cloud)", scene.category))
                    .autocomplete(scene.name.clone())
                    .arg(ItemArg::action(KEY, scene.id.clone())),
            );
        }

        sort_by_title(&mut items);
        Ok(items)
    }

    fn execute(&self, ctx: &mut Context, payload: &str) -> Result<String> {
        let id = payload.trim();
        if !ctx.cache.scenes.contains_key(id) && !ctx.cache.cloud_scenes.contains_key(id) {
            // An id from an older listing may simply not be cached yet.
            refresh::ensure_fresh(ctx)?;
        }
        let session = ctx.session()?;

        let status = if let Some(scene) = ctx.cache.scenes.get(id) {
            ctx.hub().activate_scene(&session, id)?;
            format!("Activated scene {}", scene.short_name)
        } else if let Some(scene) = ctx.cache.cloud_scenes.get(id) {
            replay(ctx, scene)?;
            format!("Applied cloud scene {}", scene.name)
        } else {
            return Err(LumenError::UnknownScene(id.to_string()));
        };

        ctx.invalidate_cache()?;
        Ok(status)
    }
}

/// Hub scenes worth offering: not hub-internal, and one entry per distinct
/// name and light set.
fn visible_scenes<'a>(scenes: impl Iterator<Item = &'a Scene>) -> Vec<&'a Scene> {
    let mut seen = BTreeSet::new();
    scenes
        .filter(|s| s.is_visible())
        .filter(|s| {
            let mut lights = s.lights.clone();
            lights.sort();
            seen.insert((s.short_name.clone(), lights))
        })
        .collect()
}

/// Apply each stored per-light state. Every light is attempted.
fn replay(ctx: &Context, scene: &CloudScene) -> Result<()> {
    let session = ctx.session()?;
    let mut failed = Vec::new();
    for light in &scene.lights {
        if let Err(e) = ctx.hub().set_light_state(&session, &light.id, &light.state) {
            tracing::warn!(light = %light.id, scene = %scene.id, "error applying scene: {e}");
            failed.push(light.id.clone());
        }
    }
    if failed.is_empty() {
        Ok(())
    } else {
        Err(LumenError::LightsFailed(failed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use crate::types::{CloudLightState, LightStateDelta};

    fn with_cloud_scene(fx: &Fixture) {
        let mut cache = fx.store.cache();
        let scene = CloudScene {
            id: "c1".to_string(),
            name: "Sunset".to_string(),
            category: "Nature".to_string(),
            lights: vec![
                CloudLightState {
                    id: "1".to_string(),
                    state: LightStateDelta {
                        on: Some(true),
                        bri: Some(120),
                        hue: Some(6000),
                        sat: Some(200),
                    },
                },
                CloudLightState {
                    id: "2".to_string(),
                    state: LightStateDelta::power(false),
                },
            ],
        };
        cache.cloud_scenes.insert(scene.id.clone(), scene);
        fx.store.0.borrow_mut().cache = Some(serde_json::to_string(&cache).unwrap());
    }

    #[test]
    fn hides_internal_and_duplicate_scenes() {
        let fx = Fixture::paired().with_fresh_cache();
        let mut ctx = fx.open();
        let items = ScenesCommand.list(&mut ctx, &Query::new("")).unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Bright", "Relax"]);
        assert_eq!(items[1].arg, Some(ItemArg::action(KEY, "s1")));
        assert_eq!(items[1].subtitle, "Desk, Lamp");
    }

    #[test]
    fn same_name_different_lights_are_kept() {
        let fx = Fixture::paired();
        fx.hub.0.borrow_mut().scenes.insert(
            "s5".to_string(),
            crate::testing::scene("s5", "Relax", "u1", &["3"]),
        );
        let fx = fx.with_fresh_cache();
        let mut ctx = fx.open();
        let items = ScenesCommand.list(&mut ctx, &Query::new("relax")).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn cloud_scenes_match_on_category() {
        let fx = Fixture::paired().with_fresh_cache();
        with_cloud_scene(&fx);
        let mut ctx = fx.open();
        let items = ScenesCommand.list(&mut ctx, &Query::new("nature")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Sunset");
        assert_eq!(items[0].subtitle, "Nature (cloud)");
    }

    #[test]
    fn known_scene_activates_once() {
        let fx = Fixture::paired().with_fresh_cache();
        let mut ctx = fx.open();
        let status = ScenesCommand.execute(&mut ctx, "s3").unwrap();
        assert_eq!(status, "Activated scene Bright");
        assert_eq!(fx.hub_calls(), ["activate s3"]);
    }

    #[test]
    fn unknown_scene_names_the_id() {
        let fx = Fixture::paired().with_fresh_cache();
        let mut ctx = fx.open();
        let err = ScenesCommand.execute(&mut ctx, "nope").unwrap_err();
        assert_eq!(err.to_string(), "invalid scene nope");
        assert!(fx.hub_calls().is_empty());
    }

    #[test]
    fn stale_cache_is_refreshed_before_giving_up() {
        let fx = Fixture::paired();
        let mut ctx = fx.open();
        ScenesCommand.execute(&mut ctx, "s1").unwrap();
        assert_eq!(fx.hub_calls(), ["lights", "scenes", "groups", "activate s1"]);
    }

    #[test]
    fn cloud_scene_replays_light_states() {
        let fx = Fixture::paired().with_fresh_cache();
        with_cloud_scene(&fx);
        let mut ctx = fx.open();
        let status = ScenesCommand.execute(&mut ctx, "c1").unwrap();
        assert_eq!(status, "Applied cloud scene Sunset");
        assert_eq!(
            fx.hub_calls(),
            [
                "set_state 1 on=true, bri=120, hue=6000, sat=200",
                "set_state 2 on=false"
            ]
        );
        assert!(fx.store.cache().is_stale(fx.now));
    }

    #[test]
    fn enabled_by_cloud_scenes_alone() {
        let fx = Fixture::paired();
        assert!(!ScenesCommand.enabled(&fx.open()));
        with_cloud_scene(&fx);
        assert!(ScenesCommand.enabled(&fx.open()));
    }
}
