use super::{Command, Query};
use crate::context::Context;
use crate::error::{LumenError, Result};
use crate::menu::{fuzzy_matches, ItemArg, MenuItem};
use crate::prompt::{PromptField, PromptRequest};

pub const KEY: &str = "cloud";

const LOGIN: &str = "login";
const LOGOUT: &str = "logout";
const DOWNLOAD: &str = "download";

/// Cloud account login and scene download.
pub struct CloudCommand;

impl Command for CloudCommand {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self, ctx: &Context) -> String {
        if ctx.config.is_logged_in() {
            "Download scenes from your cloud account".to_string()
        } else {
            "Log in to your cloud account".to_string()
        }
    }

    fn enabled(&self, ctx: &Context) -> bool {
        !ctx.config.username.is_empty()
    }

    fn list(&self, ctx: &mut Context, query: &Query) -> Result<Vec<MenuItem>> {
        let items = if ctx.config.is_logged_in() {
            vec![
                MenuItem::new("Download scenes")
                    .subtitle(format!(
                        "{} cloud scenes downloaded",
                        ctx.cache.cloud_scenes.len()
                    ))
                    .arg(ItemArg::action(KEY, DOWNLOAD)),
                MenuItem::new("Log out")
                    .subtitle("Forget the cloud account token")
                    .arg(ItemArg::action(KEY, LOGOUT)),
            ]
        } else {
            vec![MenuItem::new("Log in")
                .subtitle("Sign in to download your scenes")
                .arg(ItemArg::action(KEY, LOGIN))]
        };
        Ok(items
            .into_iter()
            .filter(|i| fuzzy_matches(&i.title, &query.text))
            .collect())
    }

    fn execute(&self, ctx: &mut Context, payload: &str) -> Result<String> {
        match payload.trim() {
            LOGIN => login(ctx),
            LOGOUT => {
                ctx.config.api_token.clear();
                ctx.save_config()?;
                Ok("Logged out".to_string())
            }
            DOWNLOAD => download(ctx),
            other => Err(LumenError::InvalidPayload(format!(
                "unknown cloud action '{other}'"
            ))),
        }
    }
}

fn login(ctx: &mut Context) -> Result<String> {
    let request = PromptRequest::confirm("Log in to your cloud account")
        .with_field(PromptField::text("Username"))
        .with_field(PromptField::secret("Password"));
    let Some(values) = ctx.prompt().ask(&request)? else {
        return Ok("Login cancelled".to_string());
    };
    let [username, password] = values.as_slice() else {
        return Err(LumenError::InvalidPayload(
            "expected a username and a password".to_string(),
        ));
    };

    let token = match ctx.cloud().login(username, password) {
        Ok(token) => token,
        Err(e) => {
            ctx.prompt()
                .message(&format!("There was an error logging in:\n\n{e}"))?;
            return Err(e);
        }
    };
    ctx.config.api_token = token;
    ctx.save_config()?;
    Ok(format!("Logged in as {username}"))
}

fn download(ctx: &mut Context) -> Result<String> {
    if !ctx.config.is_logged_in() {
        return Err(LumenError::NotLoggedIn);
    }
    let scenes = ctx.cloud().scenes(&ctx.config.api_token)?;
    let count = scenes.len();
    ctx.cache.cloud_scenes = scenes.into_iter().map(|s| (s.id.clone(), s)).collect();
    ctx.save_cache()?;
    tracing::debug!(count, "downloaded cloud scenes");
    Ok(format!("Downloaded {count} scenes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use crate::types::CloudScene;

    fn logged_in() -> Fixture {
        let fx = Fixture::paired().with_fresh_cache();
        let mut config = fx.store.config();
        config.api_token = "cloud-token".to_string();
        fx.store.0.borrow_mut().config = Some(serde_json::to_string(&config).unwrap());
        fx
    }

    #[test]
    fn logged_out_offers_login() {
        let fx = Fixture::paired();
        let mut ctx = fx.open();
        let items = CloudCommand.list(&mut ctx, &Query::new("")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].arg, Some(ItemArg::action(KEY, LOGIN)));
    }

    #[test]
    fn logged_in_offers_download_and_logout() {
        let fx = logged_in();
        let mut ctx = fx.open();
        let items = CloudCommand.list(&mut ctx, &Query::new("")).unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Download scenes", "Log out"]);

        let items = CloudCommand.list(&mut ctx, &Query::new("out")).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn login_saves_token() {
        let fx = Fixture::paired();
        fx.prompt.answer(&["me", "secret"]);
        let mut ctx = fx.open();
        let status = CloudCommand.execute(&mut ctx, LOGIN).unwrap();
        assert_eq!(status, "Logged in as me");
        assert_eq!(fx.store.config().api_token, "cloud-token");

        let request = &fx.prompt.requests()[0];
        assert!(!request.fields[0].secret);
        assert!(request.fields[1].secret);
    }

    #[test]
    fn failed_login_keeps_token_empty() {
        let fx = Fixture::paired();
        fx.prompt.answer(&["me", "wrong"]);
        let mut ctx = fx.open();
        assert!(CloudCommand.execute(&mut ctx, LOGIN).is_err());
        assert!(!fx.store.config().is_logged_in());
        assert_eq!(fx.prompt.messages().len(), 1);
    }

    #[test]
    fn cancelled_login() {
        let fx = Fixture::paired();
        fx.prompt.cancel();
        let mut ctx = fx.open();
        assert_eq!(CloudCommand.execute(&mut ctx, LOGIN).unwrap(), "Login cancelled");
        assert!(fx.cloud.calls().is_empty());
    }

    #[test]
    fn logout_clears_token() {
        let fx = logged_in();
        let mut ctx = fx.open();
        CloudCommand.execute(&mut ctx, LOGOUT).unwrap();
        assert!(!fx.store.config().is_logged_in());
        assert!(fx.store.config().is_paired());
    }

    #[test]
    fn download_replaces_cloud_scenes() {
        let fx = logged_in();
        fx.cloud.0.borrow_mut().scenes = vec![CloudScene {
            id: "c9".to_string(),
            name: "Reading".to_string(),
            category: "Focus".to_string(),
            lights: Vec::new(),
        }];
        let mut ctx = fx.open();

        let status = CloudCommand.execute(&mut ctx, DOWNLOAD).unwrap();
        assert_eq!(status, "Downloaded 1 scenes");
        assert_eq!(fx.cloud.calls(), ["scenes cloud-token"]);
        let cache = fx.store.cache();
        assert_eq!(cache.cloud_scenes["c9"].name, "Reading");
        assert_eq!(cache.lights.len(), 3);
    }

    #[test]
    fn download_requires_login() {
        let fx = Fixture::paired();
        let mut ctx = fx.open();
        assert!(matches!(
            CloudCommand.execute(&mut ctx, DOWNLOAD),
            Err(LumenError::NotLoggedIn)
        ));
    }

    #[test]
    fn unknown_action_rejected() {
        let fx = Fixture::paired();
        let mut ctx = fx.open();
        assert!(matches!(
            CloudCommand.execute(&mut ctx, "upload"),
            Err(LumenError::InvalidPayload(_))
        ));
    }
}
