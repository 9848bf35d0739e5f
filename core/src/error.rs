//! Error type for the products API client.
//!
//! # Design
//! Every remote operation fails with the same error type, `NetworkError`.
//! Its variants only classify the cause for logging and for the FFI error
//! codes; callers handle all of them the same way (log, leave state as is).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("response decoding failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("request encoding failed: {0}")]
    Encode(String),
}

impl NetworkError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
