use super::{decode_payload, Command, Query};
use crate::command::lights::LightSelection;
use crate::context::Context;
use crate::error::{LumenError, Result};
use crate::menu::{ItemArg, MenuItem};
use crate::refresh;
use crate::types::{Light, LightStateDelta};
use serde::{Deserialize, Serialize};

pub const KEY: &str = "level";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    pub level: u8,
}

impl LevelAction {
    /// Accepts either `{"light":..,"level":..}` or a bare level such as `120`.
    fn parse(payload: &str) -> Result<Self> {
        match parse_level(payload) {
            Some(level) => Ok(Self { light: None, level }),
            None => decode_payload(payload),
        }
    }
}

/// A brightness level typed by the user: an integer in `0..=255`.
pub fn parse_level(text: &str) -> Option<u8> {
    text.trim().parse::<u8>().ok()
}

/// Truncated mean brightness, or `None` for no lights.
pub fn average_level<'a>(lights: impl IntoIterator<Item = &'a Light>) -> Option<u8> {
    let (sum, count) = lights
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), l| (sum + l.state.bri as u32, count + 1));
    (count > 0).then(|| (sum / count) as u8)
}

pub struct LevelCommand;

impl Command for LevelCommand {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self, _ctx: &Context) -> String {
        "Set the brightness of lights that are on".to_string()
    }

    fn enabled(&self, ctx: &Context) -> bool {
        ctx.config.is_paired()
    }

    fn list(&self, ctx: &mut Context, query: &Query) -> Result<Vec<MenuItem>> {
        refresh::ensure_fresh(ctx)?;

        let selection: LightSelection = query.bound();
        let bound = (!selection.light.is_empty()).then_some(selection.light);
        if let Some(id) = &bound {
            if !ctx.cache.lights.contains_key(id) {
                return Err(LumenError::UnknownLight(id.clone()));
            }
        }

        let on_lights = ctx
            .cache
            .lights
            .values()
            .filter(|l| l.state.on)
            .filter(|l| bound.as_deref().map_or(true, |id| l.id == id));
        let Some(current) = average_level(on_lights) else {
            return Ok(vec![MenuItem::new("No lights are currently on")]);
        };

        let text = query.text.trim();
        if text.is_empty() {
            return Ok(vec![MenuItem::new(format!("Level: {current}"))
                .subtitle("Enter a brightness between 0 and 255")]);
        }

        let item = match parse_level(text) {
            Some(level) => MenuItem::new(format!("Level: {level}"))
                .subtitle(format!("Level: {current}"))
                .arg(ItemArg::action_json(
                    KEY,
                    &LevelAction {
                        light: bound,
                        level,
                    },
                )?),
            None => MenuItem::new(format!("Level: {text}"))
                .subtitle("Enter an integer between 0 and 255"),
        };
        Ok(vec![item])
    }

    fn execute(&self, ctx: &mut Context, payload: &str) -> Result<String> {
        let action = LevelAction::parse(payload)?;
        let session = ctx.session()?;

        // Live state, so lights switched on since the last refresh are included.
        let lights = ctx.hub().lights(&session)?;
        // Only lights that are on take a brightness, bound or not.
        let targets: Vec<&Light> = match &action.light {
            Some(id) => {
                let light = lights
                    .get(id)
                    .ok_or_else(|| LumenError::UnknownLight(id.clone()))?;
                std::iter::once(light).filter(|l| l.state.on).collect()
            }
            None => lights.values().filter(|l| l.state.on).collect(),
        };

        let delta = LightStateDelta::brightness(action.level);
        let mut failed = Vec::new();
        for light in &targets {
            if let Err(e) = ctx.hub().set_light_state(&session, &light.id, &delta) {
                tracing::warn!(light = %light.id, "error setting level: {e}");
                failed.push(light.id.clone());
            }
        }

        ctx.invalidate_cache()?;
        if !failed.is_empty() {
            return Err(LumenError::LightsFailed(failed));
        }
        Ok(format!(
            "Set level of {} light(s) to {}",
            targets.len(),
            action.level
        ))
    }
}
