//! Error taxonomy for the mock registry.
//!
//! Every failure surfaces to the client as HTTP 500 with a plain-text body
//! `Error: <message>`; only the message text distinguishes the kinds. The
//! conversion to a response lives in the server module.

use thiserror::Error;

/// Errors raised while handling a request.
#[derive(Debug, Error)]
pub enum MockError {
    /// Registration body had no usable `path` field.
    #[error("No path given")]
    NoPath,

    /// Registration body was not valid JSON.
    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),

    /// No fixture stored under the canonical path.
    #[error("No response registered for path {0}")]
    NotRegistered(String),

    /// Anything else (body read failure, malformed stored status code).
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}
