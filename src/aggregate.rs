//! Request aggregation: merges invocation requests that share a grouping key
//! into the minimum number of outbound calls.

use std::collections::HashMap;

use crate::call::OutboundCall;
use crate::request::{ActionPayload, GroupKey, InvocationRequest};
use crate::{Error, Result};

/// Path template of the remote action API, appended to the credential's base
/// endpoint.
fn action_path(key: &GroupKey) -> String {
    format!(
        "{}/services/data/v{}/actions/custom/flow/{}",
        key.credential_ref, key.api_version, key.action_name
    )
}

/// Aggregate invocation requests into one [`OutboundCall`] per distinct
/// grouping key (credential_ref, action_name, api_version).
///
/// Pure function of its input: no side effects beyond validation failure, and
/// structurally identical output for identical input. Output calls appear in
/// the order their keys were first encountered.
///
/// Target identifiers accumulate per key in a documented order: for each
/// request in input order, every `target_ids` entry (in list order), then the
/// singular `target_id` if present. Tests rely on this order; it is part of
/// the contract, not incidental.
///
/// # Errors
///
/// Fails with [`Error::Validation`] if any request carries neither a
/// `target_id` nor a non-empty `target_ids`. A single invalid request aborts
/// the entire aggregation; there are no partial results.
pub fn aggregate(requests: &[InvocationRequest]) -> Result<Vec<OutboundCall>> {
    for (i, request) in requests.iter().enumerate() {
        if !request.has_targets() {
            return Err(Error::validation(format!(
                "request {} ({}) has no target identifiers: one of target_id or target_ids is required",
                i, request.action_name
            )));
        }
    }

    // HashMap buckets the ids; the separate key vec pins first-seen order so
    // output is deterministic.
    let mut targets_by_key: HashMap<GroupKey, Vec<String>> = HashMap::new();
    let mut key_order: Vec<GroupKey> = Vec::new();

    for request in requests {
        let key = request.group_key();
        let targets = targets_by_key.entry(key.clone()).or_insert_with(|| {
            key_order.push(key);
            Vec::new()
        });
        // Every list entry is forwarded verbatim; only the singular id is
        // skipped when blank.
        targets.extend(request.target_ids.iter().cloned());
        if let Some(id) = request.target_id.as_deref() {
            if !id.trim().is_empty() {
                targets.push(id.to_string());
            }
        }
    }

    let mut calls = Vec::with_capacity(key_order.len());
    for key in key_order {
        let targets = targets_by_key
            .remove(&key)
            .unwrap_or_default();
        let body = serde_json::to_string(&ActionPayload::new(targets))?;
        calls.push(
            OutboundCall::new(action_path(&key), body)
                .with_header("Content-Type", "application/json; charset=UTF-8")
                .with_header("Accept", "application/json"),
        );
    }
    Ok(calls)
}
