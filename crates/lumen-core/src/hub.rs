//! Hub client: discovery, pairing, and the handful of local API calls the
//! palette needs.
//!
//! The [`Hub`] trait is the seam commands talk to. [`HttpHub`] implements it
//! against the hub's JSON-over-HTTP API, where failures usually arrive as a
//! `200 OK` carrying `[{"error": {"type": N, "description": "..."}}]`.

use crate::config::Config;
use crate::error::{LumenError, Result};
use crate::types::{Group, HubInfo, Light, LightStateDelta, Scene};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEVICE_TYPE: &str = "lumen#cli";

const HUB_TIMEOUT: Duration = Duration::from_secs(5);
const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Address and whitelisted username for an already paired hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub address: String,
    pub username: String,
}

impl Session {
    pub fn from_config(config: &Config) -> Result<Self> {
        if !config.is_paired() {
            return Err(LumenError::NotPaired);
        }
        Ok(Self {
            address: config.hub_address.clone(),
            username: config.username.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Hub trait
// ---------------------------------------------------------------------------

pub trait Hub {
    /// Hubs visible on the local network.
    fn discover(&self) -> Result<Vec<HubInfo>>;

    /// Register with the hub at `address`; returns the new username.
    /// The hub only accepts this shortly after its link button is pressed.
    fn pair(&self, address: &str) -> Result<String>;

    fn lights(&self, session: &Session) -> Result<BTreeMap<String, Light>>;
    fn scenes(&self, session: &Session) -> Result<BTreeMap<String, Scene>>;
    fn groups(&self, session: &Session) -> Result<BTreeMap<String, Group>>;

    fn set_light_state(&self, session: &Session, id: &str, state: &LightStateDelta)
        -> Result<()>;
    fn set_light_name(&self, session: &Session, id: &str, name: &str) -> Result<()>;
    fn activate_scene(&self, session: &Session, id: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

pub struct HttpHub {
    client: Client,
    discovery_url: String,
}

impl HttpHub {
    pub fn new(discovery_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(HUB_TIMEOUT).build()?;
        Ok(Self {
            client,
            discovery_url: discovery_url.into(),
        })
    }

    fn resource_url(session: &Session, path: &str) -> String {
        format!(
            "{}/api/{}/{}",
            base_url(&session.address),
            session.username,
            path
        )
    }

    fn fetch_map<T: DeserializeOwned>(
        &self,
        session: &Session,
        resource: &str,
    ) -> Result<BTreeMap<String, T>> {
        let url = Self::resource_url(session, resource);
        tracing::debug!(%url, "fetching {resource}");
        let body: Value = self.client.get(&url).send()?.error_for_status()?.json()?;
        check_errors(&body)?;
        if !body.is_object() {
            return Err(LumenError::UnexpectedResponse(format!(
                "expected an object of {resource}, got: {body}"
            )));
        }
        Ok(serde_json::from_value(body)?)
    }

    fn put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<()> {
        tracing::debug!(%url, "PUT");
        let reply: Value = self
            .client
            .put(url)
            .json(body)
            .send()?
            .error_for_status()?
            .json()?;
        check_errors(&reply)
    }

    fn hub_name(&self, address: &str) -> Option<String> {
        let url = format!("{}/api/config", base_url(address));
        let reply: Value = self.client.get(&url).send().ok()?.json().ok()?;
        reply.get("name")?.as_str().map(str::to_string)
    }
}

impl Hub for HttpHub {
    fn discover(&self) -> Result<Vec<HubInfo>> {
        let mut hubs: Vec<HubInfo> = self
            .client
            .get(&self.discovery_url)
            .timeout(DISCOVERY_TIMEOUT)
            .send()?
            .error_for_status()?
            .json()?;
        for hub in hubs.iter_mut().filter(|h| h.name.is_empty()) {
            match self.hub_name(&hub.address) {
                Some(name) => hub.name = name,
                None => tracing::debug!(address = %hub.address, "hub did not report a name"),
            }
        }
        Ok(hubs)
    }

    fn pair(&self, address: &str) -> Result<String> {
        let url = format!("{}/api", base_url(address));
        let reply: Value = self
            .client
            .post(&url)
            .json(&json!({ "devicetype": DEVICE_TYPE }))
            .send()?
            .error_for_status()?
            .json()?;
        check_errors(&reply)?;
        reply
            .as_array()
            .and_then(|entries| {
                entries
                    .iter()
                    .find_map(|e| e.pointer("/success/username")?.as_str())
            })
            .map(str::to_string)
            .ok_or_else(|| LumenError::UnexpectedResponse(reply.to_string()))
    }

    fn lights(&self, session: &Session) -> Result<BTreeMap<String, Light>> {
        let mut lights: BTreeMap<String, Light> = self.fetch_map(session, "lights")?;
        for (id, light) in lights.iter_mut() {
            light.id = id.clone();
        }
        Ok(lights)
    }

    fn scenes(&self, session: &Session) -> Result<BTreeMap<String, Scene>> {
        let mut scenes: BTreeMap<String, Scene> = self.fetch_map(session, "scenes")?;
        for (id, scene) in scenes.iter_mut() {
            scene.id = id.clone();
        }
        Ok(scenes)
    }

    fn groups(&self, session: &Session) -> Result<BTreeMap<String, Group>> {
        let mut groups: BTreeMap<String, Group> = self.fetch_map(session, "groups")?;
        for (id, group) in groups.iter_mut() {
            group.id = id.clone();
        }
        Ok(groups)
    }

    fn set_light_state(
        &self,
        session: &Session,
        id: &str,
        state: &LightStateDelta,
    ) -> Result<()> {
        let url = Self::resource_url(session, &format!("lights/{id}/state"));
        self.put(&url, state)
    }

    fn set_light_name(&self, session: &Session, id: &str, name: &str) -> Result<()> {
        let url = Self::resource_url(session, &format!("lights/{id}"));
        self.put(&url, &json!({ "name": name }))
    }

    fn activate_scene(&self, session: &Session, id: &str) -> Result<()> {
        let url = Self::resource_url(session, "groups/0/action");
        self.put(&url, &json!({ "scene": id }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Hub addresses are stored bare (`10.0.0.2`); tests and proxies may supply a
/// full URL instead.
pub fn base_url(address: &str) -> String {
    let address = address.trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}

/// Turn the first `{"error": ...}` entry of a hub reply into an error.
fn check_errors(reply: &Value) -> Result<()> {
    let Some(entries) = reply.as_array() else {
        return Ok(());
    };
    for entry in entries {
        if let Some(err) = entry.get("error") {
            let code = err.get("type").and_then(Value::as_u64).unwrap_or(0) as u32;
            let description = err
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(LumenError::Hub { code, description });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
