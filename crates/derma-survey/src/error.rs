use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("invalid username '{0}'")]
    InvalidUser(String),

    #[error("not authenticated — the remote survey store needs a token")]
    NotAuthenticated,

    #[error("survey storage I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("survey document is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("survey API error ({status}): {message}")]
    Api { status: u16, message: String },
}
