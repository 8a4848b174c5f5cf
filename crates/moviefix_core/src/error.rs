use serde::Serialize;
use thiserror::Error;

/// Failure reported by the catalog collaborator for one request.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LoadError {
    /// No usable response: connection failure, timeout, broken stream.
    #[error("network error: {0}")]
    Network(String),
    /// The catalog answered with a non-success status.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
    /// The response arrived but could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LoadError {
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Api { status, .. } => Some(*status),
            LoadError::Network(_) | LoadError::InvalidResponse(_) => None,
        }
    }
}
