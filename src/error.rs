//! Error types for outbound peer communication.

use reqwest::StatusCode;
use thiserror::Error;

use crate::membership::types::NodeId;

/// Failures raised while talking to another node.
///
/// These never reach HTTP clients of this node: propagation, heartbeat and
/// bootstrap log them and move on.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Connection refused, timeout, or a body that failed to decode
    #[error("transport error talking to {peer}: {source}")]
    Transport {
        peer: NodeId,
        #[source]
        source: reqwest::Error,
    },

    /// The peer answered, but not with a success status
    #[error("peer {peer} answered with status {status}")]
    UnexpectedStatus { peer: NodeId, status: StatusCode },

    /// Every seed was tried and none accepted the request
    #[error("no seed peer reachable ({attempted} tried)")]
    NoSeedReachable { attempted: usize },
}

impl ClusterError {
    pub fn transport(peer: &NodeId, source: reqwest::Error) -> Self {
        Self::Transport {
            peer: peer.clone(),
            source,
        }
    }
}
