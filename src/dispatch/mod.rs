//! Asynchronous batch dispatch.
//!
//! The [`Dispatcher`] declares the quota (maximum chunk size it can safely
//! process in one asynchronous unit of work) and executes quota-bounded
//! chunks; the [`JobRunner`] stands in for the host asynchronous job runtime,
//! driving the submit → execute → finish lifecycle on tokio tasks.

mod runner;

pub use runner::{ChunkOutcome, DispatchHandle, DispatchReport, JobRunner};

use tracing::{debug, info};

use crate::call::OutboundCall;
use crate::transport::HttpTransport;
use crate::{Error, Result};

/// Hard ceiling on outbound calls per asynchronous execution unit.
pub const DEFAULT_QUOTA: usize = 100;

/// Executes chunks of outbound calls under a declared quota.
///
/// The dispatcher never chooses chunk boundaries itself; the host runtime
/// partitions the call list and invokes [`execute`](Dispatcher::execute) per
/// chunk. Calls within a chunk are issued strictly sequentially, and the
/// first failure abandons the rest of that chunk.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    transport: HttpTransport,
    quota: usize,
}

impl Dispatcher {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            transport,
            quota: DEFAULT_QUOTA,
        }
    }

    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota.max(1);
        self
    }

    /// Maximum chunk size this dispatcher accepts in one `execute` call.
    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Execute one chunk: issue every call in input order, fail fast.
    ///
    /// Any response with status >= 400 or transport fault fails this
    /// invocation immediately; later calls in the chunk are never sent.
    /// Chunks already scheduled elsewhere are unaffected.
    pub async fn execute(&self, chunk: &[OutboundCall]) -> Result<()> {
        if chunk.len() > self.quota {
            return Err(Error::validation(format!(
                "chunk of {} calls exceeds the declared quota of {}",
                chunk.len(),
                self.quota
            )));
        }

        for (i, call) in chunk.iter().enumerate() {
            let status = self.transport.send(call).await?;
            debug!(
                call = i,
                http_status = status,
                endpoint = call.endpoint.as_str(),
                "outbound call succeeded"
            );
        }
        info!(calls = chunk.len(), "chunk executed");
        Ok(())
    }

    /// Lifecycle hook invoked once after all chunks settle. No business
    /// logic; retained for observability symmetry with submit/execute.
    pub fn finish(&self) {
        debug!("dispatch batch finished");
    }
}
