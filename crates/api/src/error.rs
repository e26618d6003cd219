#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unknown {kind} name: {name}")]
    UnknownName { kind: &'static str, name: String },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
