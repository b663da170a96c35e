//! Transport-capture record for one outbound call.

use serde::{Deserialize, Serialize};

pub const DEFAULT_METHOD: &str = "POST";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// A fully captured outbound HTTP call: fields only, no platform request
/// object, so it can cross the synchronous/asynchronous boundary, sit in a
/// queue, or be serialized into a durable job store.
///
/// Constructed once by the aggregator, immutable thereafter, and consumed
/// read-only by the dispatcher's transport step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundCall {
    pub endpoint: String,
    pub method: String,
    /// JSON-encoded request body.
    pub body: String,
    /// Header name/value pairs, applied in order.
    pub headers: Vec<(String, String)>,
    pub timeout_ms: u64,
    pub compressed: bool,
}

impl OutboundCall {
    pub fn new(endpoint: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: DEFAULT_METHOD.to_string(),
            body: body.into(),
            headers: Vec::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            compressed: true,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }
}
