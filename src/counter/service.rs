//! Replicated Counter
//!
//! Holds the counter value and the per-origin request history of one node.
//!
//! ## Responsibilities
//! - **Admission**: Applies each `(origin, request id)` pair at most once.
//! - **Propagation**: Forwards increments that originated here to every
//!   known peer, one detached task per peer, each with its own retry budget.
//! - **Merge**: Accepts a remote value only if it is larger than ours, which
//!   lets a restarting node catch up without ever moving backwards.

use std::sync::Arc;
use tokio::sync::Mutex;

use super::types::{CounterState, RequestId};
use crate::backoff::{RetryPolicy, retry};
use crate::client::PeerClient;
use crate::membership::service::MembershipService;
use crate::membership::types::NodeId;

pub struct ReplicatedCounter {
    state: Mutex<CounterState>,
    membership: Arc<MembershipService>,
    retry_policy: RetryPolicy,
    client: PeerClient,
}

impl ReplicatedCounter {
    pub fn new(
        membership: Arc<MembershipService>,
        retry_policy: RetryPolicy,
        client: PeerClient,
    ) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(CounterState::default()),
            membership,
            retry_policy,
            client,
        })
    }

    pub fn local_id(&self) -> &NodeId {
        &self.membership.local_id
    }

    /// Applies one increment unless this exact pair was applied before.
    pub async fn increment(&self, origin: NodeId, request_id: RequestId) -> bool {
        let mut state = self.state.lock().await;

        if !state.admit(origin.clone(), request_id.clone()) {
            tracing::info!(
                "Request {} from {} already processed, skipping",
                request_id.0,
                origin
            );
            return false;
        }

        tracing::info!("Counter incremented by node {}, new value: {}", origin, state.value);
        true
    }

    /// Entry point for `/increment`.
    ///
    /// Applies the increment under a fresh request id and, when this node is
    /// the origin, fans it out to the peers in the background.
    pub async fn handle_increment_request(&self, origin: NodeId) {
        let request_id = RequestId::new();
        self.increment(origin.clone(), request_id).await;

        if &origin == self.local_id() {
            self.propagate_increment(&origin);
        }
    }

    /// Announces one increment to every known peer except `origin`.
    ///
    /// The announcement carries this node's id, so receivers apply it without
    /// forwarding it further. Returns the number of peers targeted.
    pub fn propagate_increment(&self, origin: &NodeId) -> usize {
        let targets: Vec<NodeId> = self
            .membership
            .get_peers()
            .into_iter()
            .filter(|peer| peer != origin)
            .collect();

        tracing::info!("Propagating increment to peers: {:?}", targets);

        let count = targets.len();
        for target in targets {
            let client = self.client.clone();
            let policy = self.retry_policy.clone();
            let sender = self.local_id().clone();

            tokio::spawn(async move {
                let result = retry(&policy, || async {
                    client.increment(&target, &sender).await.inspect_err(|e| {
                        tracing::warn!("Failed to propagate to {}: {}", target, e)
                    })
                })
                .await;

                if let Err(e) = result {
                    tracing::error!(
                        "Failed to propagate increment to {} after retries: {}",
                        target,
                        e
                    );
                }
            });
        }
        count
    }

    /// Raises the counter to `latest` if that is strictly greater.
    pub async fn set_count(&self, latest: u64) -> bool {
        let mut state = self.state.lock().await;
        let updated = state.merge(latest);
        if updated {
            tracing::info!("Counter synchronized to latest value: {}", state.value);
        }
        updated
    }

    pub async fn get_count(&self) -> u64 {
        self.state.lock().await.value
    }
}
