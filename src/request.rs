//! Invocation request and wire payload types.

use serde::{Deserialize, Serialize};

/// One logical request to invoke a remote flow action against one or more
/// target records.
///
/// At least one of `target_id` / `target_ids` must carry an identifier;
/// aggregation rejects requests where both are absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Name of the remote flow action to invoke.
    pub action_name: String,
    /// Single target record identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    /// Multiple target record identifiers; unioned with `target_id`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_ids: Vec<String>,
    /// Opaque reference to the authenticated base endpoint to call through.
    pub credential_ref: String,
    /// Protocol version segment of the endpoint path.
    pub api_version: u32,
}

impl InvocationRequest {
    pub fn new(
        action_name: impl Into<String>,
        credential_ref: impl Into<String>,
        api_version: u32,
    ) -> Self {
        Self {
            action_name: action_name.into(),
            target_id: None,
            target_ids: Vec::new(),
            credential_ref: credential_ref.into(),
            api_version,
        }
    }

    pub fn with_target_id(mut self, id: impl Into<String>) -> Self {
        self.target_id = Some(id.into());
        self
    }

    pub fn with_target_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this request resolves at least one target identifier.
    ///
    /// A blank singular `target_id` does not count, but any non-empty
    /// `target_ids` list does: list entries are forwarded verbatim, so the
    /// list being present is what matters here.
    pub fn has_targets(&self) -> bool {
        self.target_id.as_deref().is_some_and(|id| !id.trim().is_empty())
            || !self.target_ids.is_empty()
    }

    /// The grouping key identifying the outbound call this request merges into.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            credential_ref: self.credential_ref.clone(),
            action_name: self.action_name.clone(),
            api_version: self.api_version,
        }
    }
}

/// Composite key identifying one outbound call's destination.
///
/// An explicit struct with value equality rather than a concatenated string,
/// so `("X2", 1)` and `(".0X2", 10)` style inputs can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub credential_ref: String,
    pub action_name: String,
    pub api_version: u32,
}

/// Wire body of one aggregated action invocation:
/// `{"inputs":[{"targetId": ..}, ..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPayload {
    pub inputs: Vec<ActionInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInput {
    #[serde(rename = "targetId")]
    pub target_id: String,
}

impl ActionPayload {
    pub fn new(target_ids: Vec<String>) -> Self {
        Self {
            inputs: target_ids
                .into_iter()
                .map(|target_id| ActionInput { target_id })
                .collect(),
        }
    }
}
