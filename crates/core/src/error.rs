use thiserror::Error;

#[derive(Error, Debug)]
pub enum SciplensError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not materialize index from input: {0}")]
    Decode(String),
    #[error("Could not encode index: {0}")]
    Encode(String),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<globset::Error> for SciplensError {
    fn from(err: globset::Error) -> Self {
        SciplensError::InvalidPattern(err.to_string())
    }
}

impl From<regex::Error> for SciplensError {
    fn from(err: regex::Error) -> Self {
        SciplensError::InvalidPattern(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SciplensError>;
