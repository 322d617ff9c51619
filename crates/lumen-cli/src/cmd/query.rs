use crate::output::print_items;
use crate::session::Options;
use lumen_core::Dispatcher;

pub fn run(opts: &Options, words: &[String], data: Option<&str>, json: bool) -> anyhow::Result<()> {
    let mut ctx = opts.open()?;
    let items = Dispatcher::new().query(&mut ctx, &words.join(" "), data);
    print_items(&items, json)
}
