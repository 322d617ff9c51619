//! The palette's command set. Each command owns one keyword.

use crate::context::Context;
use crate::error::{LumenError, Result};
use crate::menu::MenuItem;
use serde::de::DeserializeOwned;

pub mod cloud;
pub mod groups;
pub mod hub;
pub mod level;
pub mod lights;
pub mod scenes;
pub mod sync;

/// Input to query mode: the text typed after the keyword, plus whatever data
/// the previously selected item bound (e.g. the chosen light id).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub data: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Decode bound data. Unreadable data is logged and treated as absent.
    pub fn bound<T: DeserializeOwned + Default>(&self) -> T {
        match self.data.as_deref().map(str::trim) {
            None | Some("") => T::default(),
            Some(data) => serde_json::from_str(data).unwrap_or_else(|e| {
                tracing::warn!("error decoding bound data '{data}': {e}");
                T::default()
            }),
        }
    }
}

pub trait Command {
    fn key(&self) -> &'static str;

    /// One-line description shown in the root menu.
    fn description(&self, ctx: &Context) -> String;

    fn enabled(&self, ctx: &Context) -> bool;

    fn list(&self, ctx: &mut Context, query: &Query) -> Result<Vec<MenuItem>>;

    /// Perform the command's action and return a short status line.
    fn execute(&self, ctx: &mut Context, payload: &str) -> Result<String>;
}

/// All commands, in root-menu order.
pub fn all() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(scenes::ScenesCommand),
        Box::new(lights::LightsCommand),
        Box::new(level::LevelCommand),
        Box::new(groups::GroupsCommand),
        Box::new(sync::SyncCommand),
        Box::new(hub::HubCommand),
        Box::new(cloud::CloudCommand),
    ]
}

/// Decode a JSON action payload.
pub(crate) fn decode_payload<T: DeserializeOwned>(payload: &str) -> Result<T> {
    serde_json::from_str(payload)
        .map_err(|e| LumenError::InvalidPayload(format!("'{payload}': {e}")))
}
