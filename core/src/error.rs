use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidArgument,
    NotFound,
    Internal,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Internal => "INTERNAL",
        };
        write!(f, "{}", s)
    }
}

pub trait WayfinderError: std::error::Error {
    fn error_code(&self) -> ErrorCode;
}

/// Failure to turn a map asset into a usable campus.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed map data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read map data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid map data: {0}")]
    InvalidData(String),
}

impl WayfinderError for LoadError {
    fn error_code(&self) -> ErrorCode {
        match self {
            LoadError::Json(_) | LoadError::InvalidData(_) => ErrorCode::InvalidArgument,
            LoadError::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::NotFound
            }
            LoadError::Io(_) => ErrorCode::Internal,
        }
    }
}
