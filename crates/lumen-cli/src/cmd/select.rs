use crate::cmd::action::print_status;
use crate::output::print_items;
use crate::session::Options;
use anyhow::Context;
use lumen_core::menu::ItemArg;
use lumen_core::{Dispatcher, Outcome};

/// Follow an item's encoded arg, as printed by `lumen query`.
pub fn run(opts: &Options, arg: &str, json: bool) -> anyhow::Result<()> {
    let arg = ItemArg::decode(arg)?;
    let mut ctx = opts.open()?;
    let outcome = Dispatcher::new()
        .select(&mut ctx, &arg)
        .with_context(|| format!("'{}' failed", arg.keyword))?;
    match outcome {
        Outcome::Items(items) => print_items(&items, json),
        Outcome::Status(status) => print_status(&status, json),
    }
}
