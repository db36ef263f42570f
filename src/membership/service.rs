use dashmap::DashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::types::{MembershipConfig, NodeId};
use crate::backoff::{RetryPolicy, retry};
use crate::client::PeerClient;

/// Owns this node's view of the cluster.
///
/// The peer set never contains `local_id`. Both sets are concurrent sets, so
/// every mutation takes a short shard lock and no lock is ever held across a
/// network call.
pub struct MembershipService {
    pub local_id: NodeId,
    peers: DashSet<NodeId>,
    /// Peers already gossiped about. Grows for the lifetime of the process.
    seen_peers: DashSet<NodeId>,
    config: MembershipConfig,
    retry_policy: RetryPolicy,
    client: PeerClient,
}

impl MembershipService {
    pub fn new(
        local_id: NodeId,
        initial_peers: Vec<NodeId>,
        config: MembershipConfig,
        retry_policy: RetryPolicy,
        client: PeerClient,
    ) -> Arc<Self> {
        let peers = DashSet::new();
        for peer in initial_peers {
            if peer != local_id {
                peers.insert(peer);
            }
        }

        Arc::new(Self {
            local_id,
            peers,
            seen_peers: DashSet::new(),
            config,
            retry_policy,
            client,
        })
    }

    /// Adds `peer` to the peer set. Returns `true` if it was not known yet.
    pub fn register_peer(&self, peer: NodeId) -> bool {
        if peer == self.local_id {
            return false;
        }
        let inserted = self.peers.insert(peer.clone());
        if inserted {
            tracing::info!("Registered new peer: {}", peer);
        }
        inserted
    }

    pub fn get_peers(&self) -> Vec<NodeId> {
        self.peers.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn contains_peer(&self, peer: &NodeId) -> bool {
        self.peers.contains(peer)
    }

    pub fn remove_peer(&self, peer: &NodeId) -> bool {
        self.peers.remove(peer).is_some()
    }

    /// Handles a join (or a gossiped announcement) of `requester`.
    ///
    /// Registers it, schedules a delayed gossip round about it and returns the
    /// current peer list, which already includes `requester`.
    pub fn join(self: &Arc<Self>, requester: NodeId) -> Vec<NodeId> {
        self.register_peer(requester.clone());

        let service = self.clone();
        let delay = self.config.join_propagation_delay;
        let announced = requester.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            service.propagate_new_peer(announced);
        });

        let peers = self.get_peers();
        tracing::info!(
            "Peer {} joined, answering with {} peer(s)",
            requester,
            peers.len()
        );
        peers
    }

    /// Gossips `new_peer` to every known peer except itself.
    ///
    /// Each target gets its own task with its own retry budget. Returns
    /// `false` without sending anything if `new_peer` was already announced.
    pub fn propagate_new_peer(&self, new_peer: NodeId) -> bool {
        if !self.seen_peers.insert(new_peer.clone()) {
            tracing::debug!("Peer {} already propagated, skipping", new_peer);
            return false;
        }

        let targets: Vec<NodeId> = self
            .get_peers()
            .into_iter()
            .filter(|peer| peer != &new_peer)
            .collect();

        tracing::debug!("Propagating peer {} to {} peer(s)", new_peer, targets.len());

        for target in targets {
            let client = self.client.clone();
            let policy = self.retry_policy.clone();
            let announced = new_peer.clone();

            tokio::spawn(async move {
                let result = retry(&policy, || async {
                    client.join(&target, &announced).await.inspect_err(|e| {
                        tracing::warn!("Failed to inform {} about {}: {}", target, announced, e)
                    })
                })
                .await;

                if let Err(e) = result {
                    tracing::error!(
                        "Giving up informing {} about new peer {}: {}",
                        target,
                        announced,
                        e
                    );
                }
            });
        }

        true
    }

    /// Probes every known peer once, concurrently, and evicts the ones that
    /// fail. Returns the evicted peers.
    pub async fn heartbeat_once(&self) -> Vec<NodeId> {
        let mut probes = JoinSet::new();
        for peer in self.get_peers() {
            let client = self.client.clone();
            probes.spawn(async move {
                let outcome = client.ping(&peer).await;
                (peer, outcome)
            });
        }

        let mut evicted = Vec::new();
        while let Some(joined) = probes.join_next().await {
            let (peer, outcome) = match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Heartbeat probe task failed: {}", e);
                    continue;
                }
            };

            if let Err(e) = outcome {
                tracing::warn!("Peer {} is down, removing from list: {}", peer, e);
                if self.remove_peer(&peer) {
                    evicted.push(peer);
                }
            }
        }

        if !evicted.is_empty() {
            tracing::info!("Cluster view now: {} peer(s)", self.peers.len());
        }
        evicted
    }

    /// Runs liveness sweeps forever, one every `heartbeat_interval`.
    pub async fn heartbeat_loop(self: Arc<Self>) {
        tracing::info!(
            "Starting heartbeat every {:?}",
            self.config.heartbeat_interval
        );
        let mut interval = tokio::time::interval(self.config.heartbeat_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.heartbeat_once().await;
        }
    }
}
