//! Helpers for tests that run real nodes on loopback sockets.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::backoff::RetryPolicy;
use crate::client::PeerClient;
use crate::config::NodeConfig;
use crate::counter::service::ReplicatedCounter;
use crate::membership::service::MembershipService;
use crate::membership::types::{MembershipConfig, NodeId};
use crate::node::Node;

/// Retry policy with millisecond delays and a one second budget.
pub(crate) fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        initial_interval: Duration::from_millis(20),
        multiplier: 1.5,
        max_interval: Duration::from_millis(200),
        max_jitter: Duration::from_millis(10),
        max_elapsed: Some(Duration::from_secs(1)),
        max_attempts: None,
    }
}

/// Node settings scaled down for tests. The heartbeat interval is long so
/// tests drive liveness sweeps explicitly with `heartbeat_once`.
pub(crate) fn fast_config(node_id: NodeId, seeds: Vec<NodeId>) -> NodeConfig {
    let mut config = NodeConfig::new(node_id, seeds);
    config.membership = MembershipConfig {
        heartbeat_interval: Duration::from_secs(3600),
        join_propagation_delay: Duration::from_millis(20),
    };
    config.request_timeout = Duration::from_millis(500);
    config.propagation_retry = fast_retry();
    config.join_retry = RetryPolicy {
        initial_interval: Duration::from_millis(20),
        multiplier: 2.0,
        max_interval: Duration::from_millis(200),
        max_jitter: Duration::from_millis(10),
        max_elapsed: None,
        max_attempts: Some(3),
    };
    config
}

/// Standalone services without an HTTP server.
pub(crate) fn local_services(
    local_id: &str,
    peers: &[&str],
) -> (Arc<MembershipService>, Arc<ReplicatedCounter>) {
    let client = PeerClient::new(Duration::from_millis(500));
    let membership = MembershipService::new(
        NodeId::from(local_id),
        peers.iter().map(|peer| NodeId::from(*peer)).collect(),
        MembershipConfig {
            heartbeat_interval: Duration::from_secs(3600),
            join_propagation_delay: Duration::from_millis(20),
        },
        fast_retry(),
        client.clone(),
    );
    let counter = ReplicatedCounter::new(membership.clone(), fast_retry(), client);
    (membership, counter)
}

/// Address on which nothing is listening.
pub(crate) async fn dead_address() -> NodeId {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    NodeId::new(addr.to_string())
}

pub(crate) struct TestNode {
    pub id: NodeId,
    pub membership: Arc<MembershipService>,
    pub counter: Arc<ReplicatedCounter>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestNode {
    /// Binds a loopback port and runs a full node (server, heartbeat,
    /// bootstrap) on it.
    pub(crate) async fn spawn(seeds: Vec<NodeId>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let id = NodeId::new(listener.local_addr().expect("local addr").to_string());

        let node = Node::new(fast_config(id.clone(), seeds));
        let membership = node.membership.clone();
        let counter = node.counter.clone();

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async move {
                let _ = rx.await;
            };
            node.run(listener, shutdown).await.expect("node run");
        });

        Self {
            id,
            membership,
            counter,
            shutdown: Some(tx),
            handle,
        }
    }

    /// Stops accepting requests and waits for the server to exit.
    pub(crate) async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Polls `check` until it returns `true` or five seconds pass.
pub(crate) async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    check().await
}
