use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthorized,
    NotFound,
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    #[serde(rename = "COMMON_ERROR")]
    Common,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::Validation,
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound,
            500..=599 => Self::Common,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDetail {
    pub property: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub messages: Vec<String>,
}

/// Error body as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, rename = "errorType")]
    pub code: ErrorCode,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ValidationDetail>,
}

#[derive(Debug, Clone, Error)]
#[error("HTTP {status} {code:?}: {message}")]
pub struct ApiException {
    pub status: u16,
    pub code: ErrorCode,
    pub message: String,
    pub details: Vec<ValidationDetail>,
}

impl ApiException {
    /// Builds the error for a non-2xx response. A missing or undecodable body
    /// falls back to a code derived from the status.
    pub fn from_response(status: u16, body: Option<ApiError>) -> Self {
        match body {
            Some(body) => Self {
                status,
                code: match body.code {
                    ErrorCode::Unknown => ErrorCode::from_status(status),
                    code => code,
                },
                message: body.message,
                details: body.details,
            },
            None => Self {
                status,
                code: ErrorCode::from_status(status),
                message: format!("request failed with status {status}"),
                details: Vec::new(),
            },
        }
    }
}
