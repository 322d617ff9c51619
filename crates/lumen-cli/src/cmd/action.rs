use crate::output::print_json;
use crate::session::Options;
use anyhow::Context;
use lumen_core::Dispatcher;

pub fn run(opts: &Options, keyword: &str, payload: &[String], json: bool) -> anyhow::Result<()> {
    let mut ctx = opts.open()?;
    let status = Dispatcher::new()
        .execute(&mut ctx, keyword, &payload.join(" "))
        .with_context(|| format!("'{keyword}' failed"))?;
    print_status(&status, json)
}

pub fn print_status(status: &str, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&serde_json::json!({ "status": status }))?;
    } else {
        println!("{status}");
    }
    Ok(())
}
