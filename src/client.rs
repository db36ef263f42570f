//! Peer Client
//!
//! Typed wrapper over `reqwest::Client` for every request a node sends to
//! another node. Each call is a single attempt; callers decide whether to
//! wrap it in [`crate::backoff::retry`].

use std::time::Duration;

use crate::counter::protocol::{CountResponse, ENDPOINT_COUNT, ENDPOINT_INCREMENT, IncrementRequest};
use crate::error::ClusterError;
use crate::membership::protocol::{ENDPOINT_JOIN, ENDPOINT_PING, JoinRequest, PeerList};
use crate::membership::types::NodeId;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct PeerClient {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl PeerClient {
    pub fn new(timeout: Duration) -> Self {
        // Peers are addressed directly, never through an environment proxy
        let http_client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client ({}), using defaults", e);
                reqwest::Client::new()
            });

        Self {
            http_client,
            timeout,
        }
    }

    /// Sends `POST /join` announcing `joining` to `peer` and returns the
    /// peer list it answered with.
    pub async fn join(&self, peer: &NodeId, joining: &NodeId) -> Result<PeerList, ClusterError> {
        let payload = JoinRequest {
            id: joining.clone(),
        };
        let response = self
            .http_client
            .post(peer.url(ENDPOINT_JOIN))
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClusterError::transport(peer, e))?;

        let response = ensure_success(peer, response)?;
        response
            .json::<PeerList>()
            .await
            .map_err(|e| ClusterError::transport(peer, e))
    }

    /// Liveness probe. Any transport error or non-2xx status is a failure.
    pub async fn ping(&self, peer: &NodeId) -> Result<(), ClusterError> {
        let response = self
            .http_client
            .get(peer.url(ENDPOINT_PING))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClusterError::transport(peer, e))?;

        ensure_success(peer, response).map(|_| ())
    }

    /// Sends `POST /increment` with `origin` as the node id.
    pub async fn increment(&self, peer: &NodeId, origin: &NodeId) -> Result<(), ClusterError> {
        let payload = IncrementRequest {
            node_id: origin.clone(),
        };
        let response = self
            .http_client
            .post(peer.url(ENDPOINT_INCREMENT))
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClusterError::transport(peer, e))?;

        ensure_success(peer, response).map(|_| ())
    }

    /// Reads the counter value held by `peer`.
    pub async fn count(&self, peer: &NodeId) -> Result<u64, ClusterError> {
        let response = self
            .http_client
            .get(peer.url(ENDPOINT_COUNT))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClusterError::transport(peer, e))?;

        let response = ensure_success(peer, response)?;
        let body: CountResponse = response
            .json()
            .await
            .map_err(|e| ClusterError::transport(peer, e))?;
        Ok(body.count)
    }
}

fn ensure_success(
    peer: &NodeId,
    response: reqwest::Response,
) -> Result<reqwest::Response, ClusterError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ClusterError::UnexpectedStatus {
            peer: peer.clone(),
            status: response.status(),
        })
    }
}
