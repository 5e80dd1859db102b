//! Error taxonomy.
//!
//! Four kinds, surfaced distinctly so callers can tell them apart:
//! configuration problems caught before any network call, transport
//! failures (connection or non-2xx status), decode failures (the call
//! was accepted but the body does not match the documented schema), and
//! usage errors (an operation against a session in the wrong state).
//! Nothing is retried internally and no error is mapped to a default
//! success value.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Unified error type for every client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{operation}: could not decode response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid usage: {0}")]
    Usage(String),
}

/// Failure of the HTTP exchange itself, before any schema is involved.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never completed: DNS, TLS, connect or timeout.
    #[error("{operation}: request failed: {source}")]
    Connection {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered outside the accepted {200, 201} set.
    #[error("{operation}: service returned {status} {status_text}")]
    Status {
        operation: &'static str,
        status: u16,
        status_text: String,
    },
}

impl TransportError {
    /// The HTTP status, when the exchange got far enough to have one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Connection { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

impl ClientError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Transport(transport) => transport.status_code(),
            _ => None,
        }
    }

    /// True when the service reported the target resource as gone (404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Transport(transport) if transport.is_not_found())
    }
}
