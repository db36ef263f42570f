//! Membership Network Protocol
//!
//! Endpoints and DTOs for the join handshake, gossip announcements and
//! liveness probes. Gossip reuses the join endpoint: announcing a new peer
//! to a neighbour is the same request the peer itself would send.

use serde::{Deserialize, Serialize};

use super::types::NodeId;

/// Join handshake and gossip announcement.
pub const ENDPOINT_JOIN: &str = "/join";
/// Liveness probe used by the heartbeat.
pub const ENDPOINT_PING: &str = "/ping";
/// Snapshot of the local peer set.
pub const ENDPOINT_PEERS: &str = "/peers";

/// Body of a join request.
///
/// `id` is the address of the node entering the cluster. When gossiping,
/// it is the newly learned peer rather than the sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub id: NodeId,
}

/// Response to `/join` and `/peers`: a bare JSON array of addresses.
pub type PeerList = Vec<NodeId>;
