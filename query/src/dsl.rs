use serde::{Deserialize, Serialize};
use thiserror::Error;
use wayfinder_core::error::{ErrorCode, WayfinderError};
use wayfinder_core::model::MapObjectType;

const MAX_LIMIT: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NearestRequest {
    pub from: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("malformed request: {0}")]
    Malformed(String),
    #[error("limit must be between 1 and {0}")]
    InvalidLimit(usize),
    #[error("unknown object type: {0}")]
    UnknownType(String),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("names must not contain empty values")]
    EmptyName,
}

impl WayfinderError for RequestError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}

fn parse<'de, T: Deserialize<'de>>(raw: &'de str) -> Result<T, RequestError> {
    serde_json::from_str(raw).map_err(|err| RequestError::Malformed(err.to_string()))
}

fn parse_type(raw: &str) -> Result<MapObjectType, RequestError> {
    raw.parse()
        .map_err(|_| RequestError::UnknownType(raw.to_string()))
}

impl SearchRequest {
    pub fn parse_json(raw: &str) -> Result<Self, RequestError> {
        parse(raw)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_LIMIT {
                return Err(RequestError::InvalidLimit(MAX_LIMIT));
            }
        }
        self.object_types().map(|_| ())
    }

    pub fn object_types(&self) -> Result<Vec<MapObjectType>, RequestError> {
        self.types.iter().map(|t| parse_type(t)).collect()
    }
}

impl RouteRequest {
    pub fn parse_json(raw: &str) -> Result<Self, RequestError> {
        parse(raw)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.from.trim().is_empty() {
            return Err(RequestError::EmptyField("from"));
        }
        if self.to.trim().is_empty() {
            return Err(RequestError::EmptyField("to"));
        }
        Ok(())
    }
}

impl NearestRequest {
    pub fn parse_json(raw: &str) -> Result<Self, RequestError> {
        parse(raw)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.from.trim().is_empty() {
            return Err(RequestError::EmptyField("from"));
        }
        if self.names.iter().any(|name| name.trim().is_empty()) {
            return Err(RequestError::EmptyName);
        }
        self.target_type().map(|_| ())
    }

    pub fn target_type(&self) -> Result<MapObjectType, RequestError> {
        parse_type(&self.object_type)
    }
}
