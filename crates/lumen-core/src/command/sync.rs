use super::{Command, Query};
use crate::context::Context;
use crate::error::Result;
use crate::menu::{ItemArg, MenuItem};
use crate::refresh::{self, RefreshSummary};

pub const KEY: &str = "sync";

/// Forces a cache refresh regardless of its age.
pub struct SyncCommand;

fn summary_line(summary: &RefreshSummary) -> String {
    format!(
        "{} lights, {} scenes, {} groups",
        summary.lights, summary.scenes, summary.groups
    )
}

impl Command for SyncCommand {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self, _ctx: &Context) -> String {
        "Refresh lights, scenes and groups from the hub".to_string()
    }

    fn enabled(&self, ctx: &Context) -> bool {
        ctx.config.is_paired()
    }

    fn list(&self, ctx: &mut Context, _query: &Query) -> Result<Vec<MenuItem>> {
        let summary = refresh::refresh(ctx)?;
        Ok(vec![MenuItem::new("Refreshed!")
            .subtitle(summary_line(&summary))
            .arg(ItemArg::action(KEY, ""))])
    }

    fn execute(&self, ctx: &mut Context, _payload: &str) -> Result<String> {
        let summary = refresh::refresh(ctx)?;
        Ok(format!("Refreshed {}", summary_line(&summary)))
    }
}
