//! Inbound facade: the fire-and-forget surface the workflow engine calls.

use std::sync::Arc;

use crate::aggregate::aggregate;
use crate::call::OutboundCall;
use crate::dispatch::{DispatchHandle, Dispatcher, JobRunner, DEFAULT_QUOTA};
use crate::request::InvocationRequest;
use crate::transport::HttpTransport;
use crate::Result;

/// Builder for [`FlowRelay`].
///
/// Keep this surface area small and predictable: quota, default call
/// timeout, and a transport override for tests.
pub struct FlowRelayBuilder {
    quota: usize,
    timeout_ms: Option<u64>,
    transport: Option<HttpTransport>,
}

impl FlowRelayBuilder {
    pub fn new() -> Self {
        Self {
            quota: DEFAULT_QUOTA,
            timeout_ms: None,
            transport: None,
        }
    }

    /// Maximum outbound calls per asynchronous execution unit.
    pub fn quota(mut self, quota: usize) -> Self {
        self.quota = quota.max(1);
        self
    }

    /// Override the default per-call timeout applied to aggregated calls.
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Inject a pre-built transport (primarily for tests).
    pub fn transport(mut self, transport: HttpTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<FlowRelay> {
        let transport = match self.transport {
            Some(t) => t,
            None => HttpTransport::new()?,
        };
        Ok(FlowRelay {
            dispatcher: Arc::new(Dispatcher::new(transport).with_quota(self.quota)),
            timeout_ms: self.timeout_ms,
        })
    }
}

impl Default for FlowRelayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes invocation requests from the workflow engine to the remote action
/// API: aggregates synchronously, then hands the call list to the
/// asynchronous job runner.
///
/// The caller only ever observes synchronous validation failures; dispatch
/// outcomes are decoupled and, by default, fire-and-forget.
pub struct FlowRelay {
    dispatcher: Arc<Dispatcher>,
    timeout_ms: Option<u64>,
}

impl FlowRelay {
    pub fn builder() -> FlowRelayBuilder {
        FlowRelayBuilder::new()
    }

    /// Aggregate and submit, fire-and-forget.
    ///
    /// Must be called from within a tokio runtime (the batch executes on
    /// spawned tasks). Returns as soon as the batch is handed off.
    ///
    /// # Errors
    ///
    /// Only [`crate::Error::Validation`] surfaces here; dispatch failures are
    /// logged asynchronously and never reach this caller.
    pub fn submit(&self, requests: &[InvocationRequest]) -> Result<()> {
        let calls = self.finalize(requests)?;
        JobRunner::submit(Arc::clone(&self.dispatcher), calls);
        Ok(())
    }

    /// Aggregate and submit, additionally returning a completion handle.
    ///
    /// Submission itself does not block; awaiting the handle is optional and
    /// does not change dispatch behavior.
    pub fn submit_with_notify(&self, requests: &[InvocationRequest]) -> Result<DispatchHandle> {
        let calls = self.finalize(requests)?;
        Ok(JobRunner::submit_with_notify(
            Arc::clone(&self.dispatcher),
            calls,
        ))
    }

    fn finalize(&self, requests: &[InvocationRequest]) -> Result<Vec<OutboundCall>> {
        let calls = aggregate(requests)?;
        Ok(match self.timeout_ms {
            Some(ms) => calls.into_iter().map(|c| c.with_timeout_ms(ms)).collect(),
            None => calls,
        })
    }
}
