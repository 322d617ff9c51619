//! Menu items returned in query mode, and the launcher JSON they render to.

use crate::error::{LumenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// ItemArg
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Re-enter query mode with `data` bound.
    Tell,
    /// Run the command's action with `data` as payload.
    Do,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Tell => "tell",
            Mode::Do => "do",
        })
    }
}

/// What selecting an item does. Serialized to a JSON string as the item's
/// launcher `arg`, and handed back to `lumen select` when chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemArg {
    pub keyword: String,
    pub mode: Mode,
    #[serde(default)]
    pub data: String,
}

impl ItemArg {
    pub fn tell(keyword: &str, data: impl Into<String>) -> Self {
        Self {
            keyword: keyword.to_string(),
            mode: Mode::Tell,
            data: data.into(),
        }
    }

    pub fn action(keyword: &str, data: impl Into<String>) -> Self {
        Self {
            keyword: keyword.to_string(),
            mode: Mode::Do,
            data: data.into(),
        }
    }

    /// Action whose payload is `payload` encoded as JSON.
    pub fn action_json<T: Serialize>(keyword: &str, payload: &T) -> Result<Self> {
        Ok(Self::action(keyword, serde_json::to_string(payload)?))
    }

    pub fn tell_json<T: Serialize>(keyword: &str, data: &T) -> Result<Self> {
        Ok(Self::tell(keyword, serde_json::to_string(data)?))
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| LumenError::InvalidPayload(format!("bad item arg '{text}': {e}")))
    }
}

// ---------------------------------------------------------------------------
// MenuItem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Modifier {
    Cmd,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Cmd => "cmd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMod {
    pub subtitle: String,
    pub arg: Option<ItemArg>,
}

/// A selectable row in the palette. Items without an `arg` are shown but
/// cannot be actioned; the subtitle usually says why.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItem {
    pub title: String,
    pub subtitle: String,
    pub autocomplete: Option<String>,
    pub icon: Option<String>,
    pub arg: Option<ItemArg>,
    pub mods: BTreeMap<Modifier, ItemMod>,
}

impl MenuItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn autocomplete(mut self, text: impl Into<String>) -> Self {
        self.autocomplete = Some(text.into());
        self
    }

    pub fn icon(mut self, path: impl Into<String>) -> Self {
        self.icon = Some(path.into());
        self
    }

    pub fn arg(mut self, arg: ItemArg) -> Self {
        self.arg = Some(arg);
        self
    }

    pub fn with_mod(mut self, modifier: Modifier, item_mod: ItemMod) -> Self {
        self.mods.insert(modifier, item_mod);
        self
    }

    pub fn is_actionable(&self) -> bool {
        self.arg.is_some()
    }
}

pub fn sort_by_title(items: &mut [MenuItem]) {
    items.sort_by(|a, b| a.title.cmp(&b.title));
}

// ---------------------------------------------------------------------------
// Fuzzy matching
// ---------------------------------------------------------------------------

/// Case-insensitive match: every whitespace-separated term of `query` must
/// appear in `candidate` as a subsequence. An empty query matches everything.
pub fn fuzzy_matches(candidate: &str, query: &str) -> bool {
    let candidate = candidate.to_lowercase();
    query
        .split_whitespace()
        .all(|term| is_subsequence(&term.to_lowercase(), &candidate))
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|c| rest.any(|h| h == c))
}

// ---------------------------------------------------------------------------
// Launcher JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LauncherIcon<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct LauncherMod<'a> {
    subtitle: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    arg: Option<String>,
}

#[derive(Serialize)]
struct LauncherItem<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    subtitle: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    autocomplete: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<LauncherIcon<'a>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    mods: BTreeMap<&'static str, LauncherMod<'a>>,
}

#[derive(Serialize)]
struct Feedback<'a> {
    items: Vec<LauncherItem<'a>>,
}

fn encode_arg(arg: &Option<ItemArg>) -> Result<Option<String>> {
    arg.as_ref().map(ItemArg::encode).transpose()
}

/// Render items as the launcher's `{"items": [...]}` document.
pub fn feedback_json(items: &[MenuItem]) -> Result<String> {
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        let mut mods = BTreeMap::new();
        for (modifier, m) in &item.mods {
            mods.insert(
                modifier.as_str(),
                LauncherMod {
                    subtitle: &m.subtitle,
                    valid: m.arg.is_some(),
                    arg: encode_arg(&m.arg)?,
                },
            );
        }
        rendered.push(LauncherItem {
            title: &item.title,
            subtitle: &item.subtitle,
            valid: item.is_actionable(),
            arg: encode_arg(&item.arg)?,
            autocomplete: item.autocomplete.as_deref(),
            icon: item.icon.as_deref().map(|path| LauncherIcon { path }),
            mods,
        });
    }
    Ok(serde_json::to_string_pretty(&Feedback { items: rendered })?)
}
