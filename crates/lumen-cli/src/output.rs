use lumen_core::menu::{self, MenuItem};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", render_table(headers, &rows));
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.iter().map(|h| h.to_string()).collect());
    out.push_str(&line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        out.push_str(&line(row.clone()));
    }
    out
}

/// Print menu items: launcher JSON with `--json`, a table otherwise.
///
/// The table's last column is the item's encoded arg, ready to pass to
/// `lumen select`. Items that cannot be selected show `-`.
pub fn print_items(items: &[MenuItem], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", menu::feedback_json(items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("No matches.");
        return Ok(());
    }
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let arg = match &item.arg {
            Some(arg) => arg.encode()?,
            None => "-".to_string(),
        };
        rows.push(vec![item.title.clone(), item.subtitle.clone(), arg]);
    }
    print_table(&["TITLE", "SUBTITLE", "SELECT"], rows);
    Ok(())
}
