use shared::error::ApiException;
use thiserror::Error;

use crate::review_form::ReviewValidationError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiException),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid review: {0}")]
    InvalidReview(#[from] ReviewValidationError),
    #[error("a review submission is already in flight")]
    SubmissionInFlight,
    #[error("authorization required")]
    Unauthorized,
    #[error("failed to persist auth token: {0}")]
    TokenStorage(#[from] std::io::Error),
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
}

impl ClientError {
    /// HTTP status behind the failure, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
