//! Cloud account client used to download scenes authored outside the hub.

use crate::error::{LumenError, Result};
use crate::types::CloudScene;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const CLOUD_TIMEOUT: Duration = Duration::from_secs(10);

pub trait Cloud {
    /// Exchange account credentials for an API token.
    fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Scenes stored in the account identified by `token`.
    fn scenes(&self, token: &str) -> Result<Vec<CloudScene>>;
}

pub struct HttpCloud {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TokenReply {
    token: String,
}

impl HttpCloud {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(CLOUD_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl Cloud for HttpCloud {
    fn login(&self, username: &str, password: &str) -> Result<String> {
        let reply: TokenReply = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&json!({ "username": username, "password": password }))
            .send()?
            .error_for_status()?
            .json()?;
        if reply.token.is_empty() {
            return Err(LumenError::UnexpectedResponse(
                "login succeeded but no token was returned".to_string(),
            ));
        }
        Ok(reply.token)
    }

    fn scenes(&self, token: &str) -> Result<Vec<CloudScene>> {
        if token.is_empty() {
            return Err(LumenError::NotLoggedIn);
        }
        Ok(self
            .client
            .get(format!("{}/scenes", self.base_url))
            .bearer_auth(token)
            .send()?
            .error_for_status()?
            .json()?)
    }
}
