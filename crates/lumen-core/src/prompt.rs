use crate::error::Result;

/// One input asked of the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptField {
    pub label: String,
    /// Input is masked while typed (passwords).
    pub secret: bool,
}

impl PromptField {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            secret: false,
        }
    }

    pub fn secret(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            secret: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub message: String,
    pub fields: Vec<PromptField>,
}

impl PromptRequest {
    /// A message the user acknowledges before the command continues.
    pub fn confirm(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: PromptField) -> Self {
        self.fields.push(field);
        self
    }
}

/// Blocking user interaction used during pairing and cloud login.
pub trait Prompt {
    /// Ask the user for `request.fields`. `Ok(None)` means the user cancelled;
    /// otherwise one value per field, in order.
    fn ask(&self, request: &PromptRequest) -> Result<Option<Vec<String>>>;

    /// Show an informational message.
    fn message(&self, text: &str) -> Result<()>;
}
