use thiserror::Error;

pub type Result<T> = std::result::Result<T, CardError>;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Upstream(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Parsing error")]
    Parse,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for CardError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}

impl From<url::ParseError> for CardError {
    fn from(_: url::ParseError) -> Self {
        Self::Parse
    }
}
