//! # flow-relay
//!
//! Lets a declarative workflow engine invoke reusable server-side flow
//! actions it cannot call directly, by routing invocations through an HTTP
//! action API. The originating context may not perform network I/O, so the
//! relay captures every outbound call as a plain serializable record, merges
//! requests that target the same remote action into one call, and executes
//! the batch later on an asynchronous job runtime under a hard per-context
//! quota on outbound calls.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Invocation requests, grouping keys, wire payload |
//! | [`call`] | Immutable transport-capture record for one outbound call |
//! | [`aggregate`] | Merges requests sharing a grouping key into one call |
//! | [`transport`] | reqwest-backed execution of a captured call |
//! | [`dispatch`] | Quota-aware chunk execution and the tokio job runner |
//! | [`relay`] | Fire-and-forget facade for the workflow engine |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flow_relay::{FlowRelay, InvocationRequest};
//!
//! #[tokio::main]
//! async fn main() -> flow_relay::Result<()> {
//!     let relay = FlowRelay::builder().quota(100).build()?;
//!
//!     let requests = vec![
//!         InvocationRequest::new("Escalate_Case", "https://org.example", 58)
//!             .with_target_ids(["001", "002"]),
//!         InvocationRequest::new("Escalate_Case", "https://org.example", 58)
//!             .with_target_id("003"),
//!     ];
//!
//!     // Both requests merge into one outbound call; dispatch happens on
//!     // spawned tasks and only validation failures surface here.
//!     relay.submit(&requests)?;
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod call;
pub mod dispatch;
pub mod relay;
pub mod request;
pub mod transport;

pub mod error;
pub use error::Error;

// Re-export main types for convenience
pub use aggregate::aggregate as aggregate_requests;
pub use call::OutboundCall;
pub use dispatch::{DispatchHandle, DispatchReport, Dispatcher, JobRunner};
pub use relay::{FlowRelay, FlowRelayBuilder};
pub use request::{ActionPayload, GroupKey, InvocationRequest};
pub use transport::HttpTransport;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
