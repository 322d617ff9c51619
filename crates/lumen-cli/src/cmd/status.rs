use crate::output::print_json;
use crate::session::Options;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct StatusReport {
    config_file: PathBuf,
    cache_file: PathBuf,
    paired: bool,
    hub_address: String,
    logged_in: bool,
    /// Seconds since the last refresh; `None` when never refreshed or invalidated.
    cache_age_secs: Option<i64>,
    stale: bool,
    lights: usize,
    scenes: usize,
    groups: usize,
    cloud_scenes: usize,
    commands: Vec<&'static str>,
}

pub fn run(opts: &Options, json: bool) -> anyhow::Result<()> {
    let dirs = opts.dirs()?;
    let ctx = opts.open()?;
    let now = ctx.now();
    let never = ctx.cache.last_update.timestamp() == 0;

    let report = StatusReport {
        config_file: dirs.config_file(),
        cache_file: dirs.cache_file(),
        paired: ctx.config.is_paired(),
        hub_address: ctx.config.hub_address.clone(),
        logged_in: ctx.config.is_logged_in(),
        cache_age_secs: (!never).then(|| ctx.cache.age(now).num_seconds()),
        stale: ctx.cache.is_stale(now),
        lights: ctx.cache.lights.len(),
        scenes: ctx.cache.scenes.len(),
        groups: ctx.cache.groups.len(),
        cloud_scenes: ctx.cache.cloud_scenes.len(),
        commands: lumen_core::Dispatcher::new()
            .commands()
            .iter()
            .filter(|c| c.enabled(&ctx))
            .map(|c| c.key())
            .collect(),
    };

    if json {
        return print_json(&report);
    }

    println!("Config:   {}", report.config_file.display());
    println!("Cache:    {}", report.cache_file.display());
    if report.paired {
        println!("Hub:      {}", report.hub_address);
    } else {
        println!("Hub:      not paired (run 'lumen query hub')");
    }
    println!(
        "Cloud:    {}",
        if report.logged_in { "logged in" } else { "logged out" }
    );
    println!(
        "Cached:   {} lights, {} scenes, {} groups, {} cloud scenes",
        report.lights, report.scenes, report.groups, report.cloud_scenes
    );
    match report.cache_age_secs {
        Some(age) if report.stale => println!("Updated:  {age}s ago (stale)"),
        Some(age) => println!("Updated:  {age}s ago"),
        None => println!("Updated:  never"),
    }
    println!("Commands: {}", report.commands.join(", "));
    Ok(())
}
