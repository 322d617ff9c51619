use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
use lumen_core::error::{LumenError, Result};
use lumen_core::prompt::{Prompt, PromptRequest};

/// `Prompt` backed by the terminal. Messages go to stderr so stdout only
/// carries command output.
pub struct TerminalPrompt {
    /// Accept confirmations without asking (`--yes`). Requests that need
    /// typed input are cancelled instead.
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

fn prompt_error(e: dialoguer::Error) -> LumenError {
    LumenError::Io(std::io::Error::other(e))
}

impl Prompt for TerminalPrompt {
    fn ask(&self, request: &PromptRequest) -> Result<Option<Vec<String>>> {
        let theme = ColorfulTheme::default();

        if request.fields.is_empty() {
            if self.assume_yes {
                eprintln!("{}", request.message);
                return Ok(Some(Vec::new()));
            }
            let confirmed = Confirm::with_theme(&theme)
                .with_prompt(request.message.as_str())
                .default(true)
                .interact()
                .map_err(prompt_error)?;
            return Ok(confirmed.then(Vec::new));
        }

        if self.assume_yes {
            tracing::warn!("'{}' needs input, cancelling under --yes", request.message);
            return Ok(None);
        }

        eprintln!("{}", request.message);
        let mut values = Vec::with_capacity(request.fields.len());
        for field in &request.fields {
            let value = if field.secret {
                Password::with_theme(&theme)
                    .with_prompt(field.label.as_str())
                    .interact()
            } else {
                Input::<String>::with_theme(&theme)
                    .with_prompt(field.label.as_str())
                    .interact_text()
            }
            .map_err(prompt_error)?;
            values.push(value);
        }
        Ok(Some(values))
    }

    fn message(&self, text: &str) -> Result<()> {
        eprintln!("{text}");
        Ok(())
    }
}
