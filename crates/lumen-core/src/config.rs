use serde::{Deserialize, Serialize};

/// Persisted pairing and login state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "IPAddress", default)]
    pub hub_address: String,
    #[serde(rename = "Username", default)]
    pub username: String,
    #[serde(rename = "APIToken", default)]
    pub api_token: String,
}

impl Config {
    /// Hub commands are only offered once a hub has been paired.
    pub fn is_paired(&self) -> bool {
        !self.hub_address.is_empty() && !self.username.is_empty()
    }

    pub fn is_logged_in(&self) -> bool {
        !self.api_token.is_empty()
    }

    pub fn pair(&mut self, address: impl Into<String>, username: impl Into<String>) {
        self.hub_address = address.into();
        self.username = username.into();
    }
}
