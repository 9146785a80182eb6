use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("HTTP error! status: {status} ({url})")]
    Http { url: String, status: u16 },
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Failed to deserialize: {0}")]
    Decode(String),
    #[error("{0}")]
    Service(String),
    #[error("Source and destination must be two different stations")]
    InvalidSelection,
    #[error("The map has not been rendered yet")]
    MapNotRendered,
}

impl From<reqwest::Error> for MapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
