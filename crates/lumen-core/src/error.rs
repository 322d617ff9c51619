use thiserror::Error;

#[derive(Debug, Error)]
pub enum LumenError {
    #[error("no hub paired: run 'lumen query hub' and select a hub")]
    NotPaired,

    #[error("not logged in to the cloud service")]
    NotLoggedIn,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("command '{0}' is not available until a hub is paired")]
    CommandDisabled(String),

    #[error("invalid scene {0}")]
    UnknownScene(String),

    #[error("light not found: {0}")]
    UnknownLight(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("hub error {code}: {description}")]
    Hub { code: u32, description: String },

    #[error("failed to update lights: {}", .0.join(", "))]
    LightsFailed(Vec<String>),

    #[error("groups are read-only")]
    ReadOnly,

    #[error("unexpected hub response: {0}")]
    UnexpectedResponse(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LumenError>;
