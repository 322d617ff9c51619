use super::{decode_payload, Command, Query};
use crate::color::{self, Rgb};
use crate::command::level::parse_level;
use crate::context::Context;
use crate::error::{LumenError, Result};
use crate::menu::{fuzzy_matches, sort_by_title, ItemArg, ItemMod, MenuItem, Modifier};
use crate::refresh;
use crate::types::{Light, LightStateDelta};
use serde::{Deserialize, Serialize};

pub const KEY: &str = "lights";

/// Payload of a light action. Exactly one of `state` or `name` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightAction {
    pub light: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<LightStateDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LightAction {
    pub fn set_state(light: &str, state: LightStateDelta) -> Self {
        Self {
            light: light.to_string(),
            state: Some(state),
            name: None,
        }
    }

    pub fn rename(light: &str, name: &str) -> Self {
        Self {
            light: light.to_string(),
            state: None,
            name: Some(name.to_string()),
        }
    }
}

/// Data bound when a light is selected from the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSelection {
    #[serde(default)]
    pub light: String,
}

pub struct LightsCommand;

impl Command for LightsCommand {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self, _ctx: &Context) -> String {
        "Control individual lights".to_string()
    }

    fn enabled(&self, ctx: &Context) -> bool {
        ctx.config.is_paired()
    }

    fn list(&self, ctx: &mut Context, query: &Query) -> Result<Vec<MenuItem>> {
        refresh::ensure_fresh(ctx)?;

        let selection: LightSelection = query.bound();
        if selection.light.is_empty() {
            list_lights(ctx, &query.text)
        } else {
            let light = ctx
                .cache
                .lights
                .get(&selection.light)
                .ok_or_else(|| LumenError::UnknownLight(selection.light.clone()))?;
            light_menu(light, &query.text)
        }
    }

    fn execute(&self, ctx: &mut Context, payload: &str) -> Result<String> {
        let action: LightAction = decode_payload(payload)?;
        if action.light.is_empty() {
            return Err(LumenError::InvalidPayload("missing light id".to_string()));
        }
        let session = ctx.session()?;

        let status = match (&action.state, &action.name) {
            (Some(state), None) if !state.is_empty() => {
                ctx.hub().set_light_state(&session, &action.light, state)?;
                format!("Set state for {} to {}", action.light, state)
            }
            (None, Some(name)) if !name.trim().is_empty() => {
                ctx.hub().set_light_name(&session, &action.light, name.trim())?;
                format!("Renamed {} to {}", action.light, name.trim())
            }
            _ => {
                return Err(LumenError::InvalidPayload(
                    "a light action must change exactly one of state or name".to_string(),
                ))
            }
        };

        ctx.invalidate_cache()?;
        Ok(status)
    }
}

// ---------------------------------------------------------------------------
// Light list
// ---------------------------------------------------------------------------

fn list_lights(ctx: &Context, text: &str) -> Result<Vec<MenuItem>> {
    let mut items = Vec::new();

    for light in ctx.cache.lights.values() {
        let title = format!("{}: {}", light.id, light.name);
        if !fuzzy_matches(&title, text) {
            continue;
        }

        let state = &light.state;
        let (icon, toggle) = if state.on {
            ("on.png", "off")
        } else {
            ("off.png", "on")
        };
        let toggle_arg = ItemArg::action_json(
            KEY,
            &LightAction::set_state(&light.id, LightStateDelta::power(!state.on)),
        )?;
        let select_arg = ItemArg::tell_json(
            KEY,
            &LightSelection {
                light: light.id.clone(),
            },
        )?;

        let mut subtitle = format!(
            "Hue: {}, Sat: {}, Bri: {}, RGB: {}",
            state.hue,
            state.sat,
            state.bri,
            color::light_rgb(state).hex()
        );
        if !state.reachable {
            subtitle.push_str(" (unreachable)");
        }

        items.push(
            MenuItem::new(title)
                .subtitle(subtitle)
                .icon(icon)
                .autocomplete(light.name.clone())
                .arg(select_arg)
                .with_mod(
                    Modifier::Cmd,
                    ItemMod {
                        subtitle: format!("Turn light {toggle}"),
                        arg: Some(toggle_arg),
                    },
                ),
        );
    }

    sort_by_title(&mut items);
    Ok(items)
}

// ---------------------------------------------------------------------------
// Per-light property menu
// ---------------------------------------------------------------------------

/// Split `"level: 120"` into `("level:", Some("120"))`.
fn split_property(text: &str) -> (&str, Option<&str>) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((property, value)) if !value.trim().is_empty() => (property, Some(value.trim())),
        Some((property, _)) => (property, None),
        None => (text, None),
    }
}

fn light_menu(light: &Light, text: &str) -> Result<Vec<MenuItem>> {
    let (property, value) = split_property(text);
    let mut items = Vec::new();

    if fuzzy_matches("name:", property) {
        items.push(name_item(light, value)?);
    }
    if fuzzy_matches("state:", property) {
        items.push(state_item(light)?);
    }
    if fuzzy_matches("level:", property) {
        items.push(level_item(light, value)?);
    }
    if fuzzy_matches("color:", property) {
        items.push(color_item(light, value)?);
    }

    Ok(items)
}

fn name_item(light: &Light, value: Option<&str>) -> Result<MenuItem> {
    Ok(match value {
        Some(new_name) => MenuItem::new(format!("Name: {new_name}"))
            .subtitle(format!("Name: {}", light.name))
            .arg(ItemArg::action_json(
                KEY,
                &LightAction::rename(&light.id, new_name),
            )?),
        None => MenuItem::new(format!("Name: {}", light.name))
            .subtitle("Update this light's name")
            .autocomplete(format!("Name: {}", light.name)),
    })
}

fn state_item(light: &Light) -> Result<MenuItem> {
    let (current, target) = if light.state.on {
        ("on", "off")
    } else {
        ("off", "on")
    };
    Ok(MenuItem::new(format!("State: {current}"))
        .subtitle(format!("Press Enter to turn this light {target}"))
        .arg(ItemArg::action_json(
            KEY,
            &LightAction::set_state(&light.id, LightStateDelta::power(!light.state.on)),
        )?))
}

fn level_item(light: &Light, value: Option<&str>) -> Result<MenuItem> {
    let current = light.state.bri;
    Ok(match value {
        Some(text) => match parse_level(text) {
            Some(bri) => MenuItem::new(format!("Level: {text}"))
                .subtitle(format!("Level: {current}"))
                .arg(ItemArg::action_json(
                    KEY,
                    &LightAction::set_state(&light.id, LightStateDelta::brightness(bri)),
                )?),
            None => MenuItem::new(format!("Level: {text}"))
                .subtitle(format!("Invalid number '{text}'")),
        },
        None => MenuItem::new(format!("Level: {current}"))
            .subtitle("Set this light's brightness")
            .autocomplete(format!("Level: {current}")),
    })
}

fn color_item(light: &Light, value: Option<&str>) -> Result<MenuItem> {
    let current = color::light_rgb(&light.state).hex();
    Ok(match value {
        Some(text) => match (Rgb::parse_hex(text), color::delta_for_hex(text)) {
            (Some(rgb), Some(delta)) => MenuItem::new(format!("Color: {}", rgb.hex()))
                .subtitle(format!("Color: {current}"))
                .arg(ItemArg::action_json(
                    KEY,
                    &LightAction::set_state(&light.id, delta),
                )?),
            _ => MenuItem::new(format!("Color: {current}"))
                .subtitle(format!("Invalid color '{text}'")),
        },
        None => MenuItem::new(format!("Color: {current}"))
            .subtitle("Change this light's color")
            .autocomplete(format!("Color: {current}")),
    })
}
