use super::{Command, Query};
use crate::context::Context;
use crate::error::{LumenError, Result};
use crate::menu::{fuzzy_matches, sort_by_title, MenuItem};
use crate::refresh;

pub const KEY: &str = "groups";

/// Read-only listing of hub groups and their member lights.
pub struct GroupsCommand;

impl Command for GroupsCommand {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self, ctx: &Context) -> String {
        format!("Browse {} light groups", ctx.cache.groups.len())
    }

    fn enabled(&self, ctx: &Context) -> bool {
        ctx.config.is_paired() && !ctx.cache.groups.is_empty()
    }

    fn list(&self, ctx: &mut Context, query: &Query) -> Result<Vec<MenuItem>> {
        refresh::ensure_fresh(ctx)?;

        let mut items: Vec<MenuItem> = ctx
            .cache
            .groups
            .values()
            .filter(|g| fuzzy_matches(&g.name, &query.text))
            .map(|g| {
                MenuItem::new(g.name.clone())
                    .subtitle(ctx.cache.light_names(&g.lights).join(", "))
                    .autocomplete(g.name.clone())
            })
            .collect();
        sort_by_title(&mut items);
        Ok(items)
    }

    fn execute(&self, _ctx: &mut Context, _payload: &str) -> Result<String> {
        Err(LumenError::ReadOnly)
    }
}
