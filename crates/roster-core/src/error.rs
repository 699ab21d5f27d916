//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Roster.
///
/// Domain variants describe values that can never form a valid user record.
/// Infrastructure variants describe collaborators (storage, cache, templates)
/// failing underneath an otherwise valid request.
#[derive(Error, Debug)]
pub enum RosterError {
    // ============ Domain Errors ============
    /// A value violated a construction invariant (e.g. a non-positive user id)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A verification timestamp could not be parsed
    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },

    // ============ Infrastructure Errors ============
    /// Storage connectivity or query failure
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Presentation Errors ============
    /// HTML template rendering failure
    #[error("Rendering error: {0}")]
    Rendering(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RosterError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArgument(_) | Self::InvalidTimestamp { .. } => 400,
            Self::StorageUnavailable(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Rendering(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Rendering(_) => "RENDERING_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates an invalid timestamp error.
    #[must_use]
    pub fn invalid_timestamp<V: Into<String>, M: ToString>(value: V, message: M) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            message: message.to_string(),
        }
    }

    /// Creates a storage unavailable error.
    #[must_use]
    pub fn storage<T: Into<String>>(message: T) -> Self {
        Self::StorageUnavailable(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for errors raised by a malformed domain value.
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::InvalidTimestamp { .. })
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for RosterError {
    fn from(err: sqlx::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request trace ID for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response from a `RosterError`.
    #[must_use]
    pub fn from_error(error: &RosterError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            trace_id: None,
        }
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

impl From<&RosterError> for ErrorResponse {
    fn from(error: &RosterError) -> Self {
        Self::from_error(error)
    }
}
