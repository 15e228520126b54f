//! Error types for the todo API client.
//!
//! # Design
//! Every non-2xx response lands in a single `RequestFailed` variant carrying
//! the status code and status text — the caller does not distinguish network
//! failure from server error from validation failure, and no structured error
//! body is parsed. The two remaining variants cover local JSON failures that
//! never involve the server.

use std::fmt;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    RequestFailed { status: u16, status_text: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { status, status_text } => {
                write!(f, "request failed: {status} {status_text}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
