// ================================================================
// File: orgomon-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Config error: {0}")]
    Config(String),

    /// Failure reported by the remote desktop API.
    #[error("Remote: {0}")]
    Remote(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("OCR: {0}")]
    Recognition(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// The message without the variant prefix, e.g. `connection reset` rather
    /// than `Remote: connection reset`.
    pub fn detail(&self) -> String {
        match self {
            Error::NotFound(msg)
            | Error::Config(msg)
            | Error::Remote(msg)
            | Error::Auth(msg)
            | Error::Recognition(msg)
            | Error::Parse(msg) => msg.clone(),
            Error::Io(e) => e.to_string(),
            Error::Http(e) => e.to_string(),
            Error::Json(e) => e.to_string(),
            Error::Base64(e) => e.to_string(),
            Error::Url(e) => e.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
