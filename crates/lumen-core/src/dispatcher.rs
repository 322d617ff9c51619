//! Keyword routing between the palette and the command set.

use crate::command::{self, Command, Query};
use crate::context::Context;
use crate::error::{LumenError, Result};
use crate::menu::{fuzzy_matches, ItemArg, Mode, MenuItem};

/// What selecting an item produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A `tell` item re-entered query mode.
    Items(Vec<MenuItem>),
    /// A `do` item ran an action.
    Status(String),
}

pub struct Dispatcher {
    commands: Vec<Box<dyn Command>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            commands: command::all(),
        }
    }

    pub fn commands(&self) -> &[Box<dyn Command>] {
        &self.commands
    }

    fn find(&self, keyword: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.key() == keyword)
            .map(|c| c.as_ref())
    }

    /// Query mode. `text` is the whole palette input, e.g. `"lights desk"`.
    /// A leading keyword naming an enabled command routes the rest of the text
    /// to it; anything else lists the matching commands.
    pub fn query(&self, ctx: &mut Context, text: &str, data: Option<&str>) -> Vec<MenuItem> {
        let text = text.trim_start();
        let (keyword, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));

        match self.find(keyword) {
            Some(command) if command.enabled(ctx) => {
                let mut query = Query::new(rest.trim_start());
                if let Some(data) = data {
                    query = query.with_data(data);
                }
                list_or_error(command, ctx, &query)
            }
            _ => self.root_menu(ctx, text),
        }
    }

    /// Enabled commands whose keyword matches `text`, in registry order.
    fn root_menu(&self, ctx: &Context, text: &str) -> Vec<MenuItem> {
        self.commands
            .iter()
            .filter(|c| c.enabled(ctx) && fuzzy_matches(c.key(), text))
            .map(|c| {
                MenuItem::new(c.key())
                    .subtitle(c.description(ctx))
                    .autocomplete(format!("{} ", c.key()))
            })
            .collect()
    }

    /// Action mode.
    pub fn execute(&self, ctx: &mut Context, keyword: &str, payload: &str) -> Result<String> {
        let command = self
            .find(keyword)
            .ok_or_else(|| LumenError::UnknownCommand(keyword.to_string()))?;
        if !command.enabled(ctx) {
            return Err(LumenError::CommandDisabled(keyword.to_string()));
        }
        tracing::debug!(keyword, payload, "executing");
        command.execute(ctx, payload)
    }

    /// Follow an item's `arg`.
    pub fn select(&self, ctx: &mut Context, arg: &ItemArg) -> Result<Outcome> {
        match arg.mode {
            Mode::Do => self.execute(ctx, &arg.keyword, &arg.data).map(Outcome::Status),
            Mode::Tell => {
                let command = self
                    .find(&arg.keyword)
                    .ok_or_else(|| LumenError::UnknownCommand(arg.keyword.clone()))?;
                if !command.enabled(ctx) {
                    return Err(LumenError::CommandDisabled(arg.keyword.clone()));
                }
                let query = Query::new("").with_data(arg.data.clone());
                Ok(Outcome::Items(list_or_error(command, ctx, &query)))
            }
        }
    }
}

/// Listing failures are shown as a single non-actionable item.
fn list_or_error(command: &dyn Command, ctx: &mut Context, query: &Query) -> Vec<MenuItem> {
    command.list(ctx, query).unwrap_or_else(|e| {
        tracing::warn!(keyword = command.key(), "error listing items: {e}");
        vec![error_item(&e)]
    })
}

pub fn error_item(e: &LumenError) -> MenuItem {
    MenuItem::new("Error").subtitle(e.to_string()).icon("error.png")
}
