//! # Framework Errors
//!
//! Common error types shared by every resource client and controller. Resource clients
//! speak [`ApiError`]; controller handles speak [`ControllerError`].

use thiserror::Error;

/// Result type for REST operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised by a resource client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 404 for the addressed resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server answered with a non-success status.
    #[error("{operation} failed with HTTP {status}")]
    Status { operation: &'static str, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Errors raised when talking to a controller through its handle.
#[derive(Debug, Error, PartialEq)]
pub enum ControllerError {
    #[error("controller closed")]
    Closed,
}
