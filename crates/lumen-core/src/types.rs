use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Lights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Hub-assigned id. The hub keys lights by id, so it is filled in after
    /// fetching rather than read from the light body.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: LightState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    #[serde(default)]
    pub on: bool,
    #[serde(default)]
    pub bri: u8,
    #[serde(default)]
    pub hue: u16,
    #[serde(default)]
    pub sat: u8,
    #[serde(default)]
    pub reachable: bool,
}

/// Partial light state sent to the hub. Absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightStateDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat: Option<u8>,
}

impl LightStateDelta {
    pub fn power(on: bool) -> Self {
        Self {
            on: Some(on),
            ..Default::default()
        }
    }

    pub fn brightness(bri: u8) -> Self {
        Self {
            bri: Some(bri),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.on.is_none() && self.bri.is_none() && self.hue.is_none() && self.sat.is_none()
    }
}

impl fmt::Display for LightStateDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(on) = self.on {
            parts.push(format!("on={on}"));
        }
        if let Some(bri) = self.bri {
            parts.push(format!("bri={bri}"));
        }
        if let Some(hue) = self.hue {
            parts.push(format!("hue={hue}"));
        }
        if let Some(sat) = self.sat {
            parts.push(format!("sat={sat}"));
        }
        f.write_str(&parts.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Scenes and groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "name")]
    pub short_name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub lights: Vec<String>,
}

impl Scene {
    /// Scenes owned by "none" are hub-internal and never offered.
    pub fn is_visible(&self) -> bool {
        self.owner != "none"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lights: Vec<String>,
}

// ---------------------------------------------------------------------------
// Cloud scenes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudScene {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub lights: Vec<CloudLightState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudLightState {
    pub id: String,
    pub state: LightStateDelta,
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubInfo {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "internalipaddress")]
    pub address: String,
    #[serde(default)]
    pub name: String,
}

impl HubInfo {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.address
        } else {
            &self.name
        }
    }
}
