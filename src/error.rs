use thiserror::Error;

/// Unified error type for the relay.
///
/// This is a deliberately small, closed taxonomy so callers can branch on
/// kind without downcasting: validation failures surface synchronously at
/// aggregation time, everything else belongs to the asynchronous dispatch
/// side and fails the chunk it occurred in.
#[derive(Debug, Error)]
pub enum Error {
    /// A request could not be aggregated. Raised synchronously; aborts the
    /// whole aggregation with no partial results.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote action API answered with a failure status (>= 400).
    /// Carries the raw response text for diagnostics.
    #[error("Dispatch failed: HTTP {status}: {body}")]
    Dispatch { status: u16, body: String },

    /// Network-level fault (timeout, DNS, connection). Handled uniformly
    /// with [`Error::Dispatch`]: the chunk stops at the failing call.
    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
