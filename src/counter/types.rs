use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::membership::types::NodeId;

/// Identifier of one applied increment, scoped to its origin node.
///
/// Generated fresh for every inbound `/increment` call; it is not carried
/// between nodes, so it only guards against a literal replay of one
/// delivered request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generates a new random UUID v4-based RequestId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Everything guarded by the counter's lock.
///
/// `history` and `value` change together so that admitting a request and
/// incrementing are one atomic step.
#[derive(Debug, Default)]
pub struct CounterState {
    pub value: u64,
    /// `origin -> request ids already applied`. Never pruned.
    pub history: HashMap<NodeId, HashSet<RequestId>>,
}

impl CounterState {
    /// Applies `(origin, request_id)` once. Returns `false` on replay.
    ///
    /// The value saturates at `u64::MAX` instead of wrapping.
    pub fn admit(&mut self, origin: NodeId, request_id: RequestId) -> bool {
        let applied = self.history.entry(origin).or_default();
        if !applied.insert(request_id) {
            return false;
        }
        self.value = self.value.saturating_add(1);
        true
    }

    /// Monotone merge: keeps the larger of the two values.
    pub fn merge(&mut self, latest: u64) -> bool {
        if latest > self.value {
            self.value = latest;
            true
        } else {
            false
        }
    }
}
