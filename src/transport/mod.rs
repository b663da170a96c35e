//! HTTP transport: turns a captured [`OutboundCall`] into a native request.

use std::time::Duration;

use tracing::debug;

use crate::call::OutboundCall;
use crate::{Error, Result};

/// Shared HTTP client for issuing outbound calls.
///
/// One pooled `reqwest::Client` serves every chunk; per-call behavior
/// (method, headers, body, timeout) comes entirely from the captured
/// [`OutboundCall`], never from client state.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;
        Ok(Self { client })
    }

    /// Issue one call and check its status.
    ///
    /// Any status >= 400 fails with [`Error::Dispatch`] carrying the response
    /// text; transport faults (timeout, DNS, connect) fail with
    /// [`Error::Transport`]. Both stop the enclosing chunk. A call carrying
    /// an invalid HTTP verb is rejected the same way before any network
    /// activity.
    pub async fn send(&self, call: &OutboundCall) -> Result<u16> {
        let method = reqwest::Method::from_bytes(call.method.to_uppercase().as_bytes())
            .map_err(|_| {
                Error::Transport(TransportError::Other(format!(
                    "invalid HTTP method: {:?}",
                    call.method
                )))
            })?;
        let mut request = self.client.request(method, &call.endpoint);

        for (name, value) in &call.headers {
            request = request.header(name, value);
        }
        // The client negotiates gzip by default; an uncompressed call opts
        // out explicitly.
        if !call.compressed {
            request = request.header("Accept-Encoding", "identity");
        }
        request = request
            .timeout(Duration::from_millis(call.timeout_ms))
            .body(call.body.clone());

        debug!(
            endpoint = call.endpoint.as_str(),
            method = call.method.as_str(),
            "issuing outbound call"
        );

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Dispatch { status, body });
        }
        Ok(status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
