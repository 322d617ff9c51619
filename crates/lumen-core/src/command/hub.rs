use super::{Command, Query};
use crate::cache::Cache;
use crate::context::Context;
use crate::error::{LumenError, Result};
use crate::menu::{fuzzy_matches, sort_by_title, ItemArg, MenuItem};
use crate::prompt::PromptRequest;

pub const KEY: &str = "hub";

const LINK_BUTTON_PROMPT: &str = "Press the button on your hub, then click OK to continue...";

/// Discovery and pairing. Always available, so an unpaired install has a way in.
pub struct HubCommand;

impl Command for HubCommand {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self, ctx: &Context) -> String {
        if ctx.config.is_paired() {
            format!("Paired with {}", ctx.config.hub_address)
        } else {
            "Find and pair with a hub".to_string()
        }
    }

    fn enabled(&self, _ctx: &Context) -> bool {
        true
    }

    fn list(&self, ctx: &mut Context, query: &Query) -> Result<Vec<MenuItem>> {
        let hubs = ctx.hub().discover()?;
        if hubs.is_empty() {
            return Ok(vec![MenuItem::new("No hubs found")
                .subtitle("Make sure your hub is powered on and on the same network")]);
        }

        let mut items: Vec<MenuItem> = hubs
            .iter()
            .filter(|h| fuzzy_matches(h.display_name(), &query.text))
            .map(|h| {
                let subtitle = if h.address == ctx.config.hub_address && ctx.config.is_paired() {
                    format!("{} (paired)", h.address)
                } else {
                    format!("Pair with the hub at {}", h.address)
                };
                MenuItem::new(h.display_name())
                    .subtitle(subtitle)
                    .autocomplete(h.display_name())
                    .arg(ItemArg::action(KEY, h.address.clone()))
            })
            .collect();
        sort_by_title(&mut items);
        Ok(items)
    }

    fn execute(&self, ctx: &mut Context, payload: &str) -> Result<String> {
        let address = payload.trim();
        if address.is_empty() {
            return Err(LumenError::InvalidPayload("missing hub address".to_string()));
        }

        if ctx
            .prompt()
            .ask(&PromptRequest::confirm(LINK_BUTTON_PROMPT))?
            .is_none()
        {
            return Ok("Pairing cancelled".to_string());
        }

        let username = match ctx.hub().pair(address) {
            Ok(username) => username,
            Err(e) => {
                ctx.prompt()
                    .message(&format!("There was an error accessing your hub:\n\n{e}"))?;
                return Err(e);
            }
        };

        ctx.config.pair(address, username);
        ctx.cache = Cache::default();
        ctx.save_config()?;
        ctx.save_cache()?;
        tracing::info!(address, "paired with hub");

        ctx.prompt()
            .message("You've successfully connected to your hub!")?;
        Ok(format!("Paired with hub at {address}"))
    }
}
