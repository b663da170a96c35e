//! Tokio-backed stand-in for the host asynchronous job runtime.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{info, warn};

use super::Dispatcher;
use crate::call::OutboundCall;
use crate::Result;

/// Outcome of one chunk's `execute` invocation.
#[derive(Debug)]
pub struct ChunkOutcome {
    /// Position of the chunk within the submitted batch.
    pub index: usize,
    /// Number of calls the chunk contained.
    pub calls: usize,
    pub result: Result<()>,
}

/// Per-chunk outcomes of a completed batch, delivered through a
/// [`DispatchHandle`].
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<ChunkOutcome>,
}

impl DispatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }
}

/// Completion notification for one submitted batch.
///
/// Additive capability: plain [`JobRunner::submit`] stays fire-and-forget;
/// this handle only exists when requested via
/// [`JobRunner::submit_with_notify`].
#[derive(Debug)]
pub struct DispatchHandle {
    rx: oneshot::Receiver<DispatchReport>,
}

impl DispatchHandle {
    /// Wait for the whole batch (all chunks plus `finish`) to settle.
    ///
    /// Returns `None` if the runtime shut down before the batch completed.
    pub async fn wait(self) -> Option<DispatchReport> {
        self.rx.await.ok()
    }
}

/// Drives the dispatch lifecycle on tokio: chunks the call list by the
/// dispatcher's quota, spawns one task per chunk, and calls `finish` exactly
/// once after every chunk settles.
///
/// Chunks are independent units of work: they run unordered with respect to
/// each other, and one chunk's failure never cancels the rest. Failures are
/// logged, not re-attempted.
pub struct JobRunner;

impl JobRunner {
    /// Submit a batch fire-and-forget. Never blocks the caller; the batch
    /// executes on spawned tasks, potentially long after this returns.
    pub fn submit(dispatcher: Arc<Dispatcher>, calls: Vec<OutboundCall>) {
        Self::spawn(dispatcher, calls, None);
    }

    /// Submit a batch and receive a completion handle with per-chunk
    /// outcomes. Submission itself still returns immediately.
    pub fn submit_with_notify(
        dispatcher: Arc<Dispatcher>,
        calls: Vec<OutboundCall>,
    ) -> DispatchHandle {
        let (tx, rx) = oneshot::channel();
        Self::spawn(dispatcher, calls, Some(tx));
        DispatchHandle { rx }
    }

    fn spawn(
        dispatcher: Arc<Dispatcher>,
        calls: Vec<OutboundCall>,
        notify: Option<oneshot::Sender<DispatchReport>>,
    ) {
        tokio::spawn(async move {
            let quota = dispatcher.quota();
            let chunks: Vec<Vec<OutboundCall>> =
                calls.chunks(quota).map(|c| c.to_vec()).collect();
            info!(
                calls = calls.len(),
                chunks = chunks.len(),
                quota,
                "batch submitted"
            );

            let mut tasks = Vec::with_capacity(chunks.len());
            for (index, chunk) in chunks.into_iter().enumerate() {
                let dispatcher = Arc::clone(&dispatcher);
                tasks.push(tokio::spawn(async move {
                    let calls = chunk.len();
                    let result = dispatcher.execute(&chunk).await;
                    if let Err(ref e) = result {
                        warn!(chunk = index, error = %e, "chunk failed");
                    }
                    ChunkOutcome {
                        index,
                        calls,
                        result,
                    }
                }));
            }

            let mut report = DispatchReport::default();
            for joined in futures::future::join_all(tasks).await {
                match joined {
                    Ok(outcome) => report.outcomes.push(outcome),
                    Err(e) => warn!(error = %e, "chunk task aborted"),
                }
            }

            dispatcher.finish();
            if let Some(tx) = notify {
                let _ = tx.send(report);
            }
        });
    }
}
