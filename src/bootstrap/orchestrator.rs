use std::sync::Arc;

use crate::backoff::{RetryPolicy, retry};
use crate::client::PeerClient;
use crate::counter::service::ReplicatedCounter;
use crate::error::ClusterError;
use crate::membership::service::MembershipService;
use crate::membership::types::NodeId;

/// Startup sequence of a node: catch up on the count, then join the cluster.
pub struct Bootstrap {
    membership: Arc<MembershipService>,
    counter: Arc<ReplicatedCounter>,
    client: PeerClient,
    seeds: Vec<NodeId>,
    join_policy: RetryPolicy,
}

impl Bootstrap {
    pub fn new(
        membership: Arc<MembershipService>,
        counter: Arc<ReplicatedCounter>,
        client: PeerClient,
        seeds: Vec<NodeId>,
        join_policy: RetryPolicy,
    ) -> Self {
        let seeds = seeds
            .into_iter()
            .filter(|seed| seed != &membership.local_id)
            .collect();

        Self {
            membership,
            counter,
            client,
            seeds,
            join_policy,
        }
    }

    pub fn seeds(&self) -> &[NodeId] {
        &self.seeds
    }

    /// Runs count sync and the join handshake side by side.
    pub async fn run(self) {
        if self.seeds.is_empty() {
            tracing::info!("No seed peers configured, starting as founder");
            return;
        }

        let (_, joined) = tokio::join!(self.sync_count(), self.join_cluster());
        if let Err(e) = joined {
            tracing::error!("Failed to join cluster: {}", e);
        }
    }

    /// Pulls the count from the first seed that answers and merges it in.
    ///
    /// Returns the seed used and the value it reported.
    pub async fn sync_count(&self) -> Option<(NodeId, u64)> {
        for seed in &self.seeds {
            match self.client.count(seed).await {
                Ok(latest) => {
                    tracing::info!("Synced latest count from {}: {}", seed, latest);
                    self.counter.set_count(latest).await;
                    return Some((seed.clone(), latest));
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch count from {}: {}", seed, e);
                }
            }
        }

        tracing::warn!("No seed answered a count request, keeping local value");
        None
    }

    /// Joins through the seeds in order, retrying each one before moving on.
    ///
    /// Every peer in the accepting seed's answer is registered locally.
    /// Returns the seed that accepted the join.
    pub async fn join_cluster(&self) -> Result<NodeId, ClusterError> {
        let local_id = &self.membership.local_id;

        for seed in &self.seeds {
            tracing::info!("Attempting to join cluster via {}...", seed);

            let joined = retry(&self.join_policy, || async {
                self.client.join(seed, local_id).await.inspect_err(|e| {
                    tracing::warn!("Failed to join via {}: {}", seed, e)
                })
            })
            .await;

            match joined {
                Ok(peers) => {
                    tracing::info!("Received updated peer list from {}: {:?}", seed, peers);
                    // The seed never lists itself; it may also have been
                    // evicted by a heartbeat while we were retrying.
                    self.membership.register_peer(seed.clone());
                    for peer in peers {
                        self.membership.register_peer(peer);
                    }
                    return Ok(seed.clone());
                }
                Err(e) => {
                    tracing::error!("Failed to join cluster via {} after retries: {}", seed, e);
                }
            }
        }

        Err(ClusterError::NoSeedReachable {
            attempted: self.seeds.len(),
        })
    }
}
