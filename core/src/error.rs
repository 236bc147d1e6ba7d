//! Classified errors for the API-access layer.
//!
//! # Design
//! Every failed call surfaces as exactly one `ApiError`, created at the
//! transport boundary and never re-classified downstream. The `kind` field is
//! a closed taxonomy: callers match on it instead of inspecting library
//! errors, and the services propagate the value untouched with `?`.

use thiserror::Error;

/// The closed failure taxonomy of the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backend was reachable and responded with error semantics; the
    /// HTTP status code is preserved in `ApiError::status`.
    Server,

    /// The request went out but no response came back (timeout, refused
    /// connection, DNS failure). Status is forced to 0.
    Network,

    /// The request could not be constructed or issued at all. Status is
    /// forced to 0.
    Request,
}

/// A classified transport failure.
///
/// `status` is the HTTP status code when a response was received and `0`
/// otherwise. `message` is what the orchestrator renders to the user, so it
/// carries the response body when the server sent one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub kind: ErrorKind,
}

impl ApiError {
    /// The backend responded with `status`; `message` is the response body
    /// when non-empty, the status line otherwise.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            kind: ErrorKind::Server,
        }
    }

    /// The backend could not be reached at all.
    pub fn network() -> Self {
        Self {
            status: 0,
            message: "Network error - Backend server not reachable".to_string(),
            kind: ErrorKind::Network,
        }
    }

    /// The request never made it onto the wire.
    pub fn request(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
            kind: ErrorKind::Request,
        }
    }
}
