use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identity of a node in the cluster.
///
/// The id doubles as the node's transport address (`host:port`), so it is
/// both what peers gossip about and where requests are sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base URL for HTTP calls to this node.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.0, path)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Timing knobs for the membership protocol.
#[derive(Debug, Clone)]
pub struct MembershipConfig {
    /// Pause between liveness sweeps over the peer set.
    pub heartbeat_interval: Duration,
    /// Wait after a join before gossiping the newcomer, so it can finish
    /// its own bootstrap first.
    pub join_propagation_delay: Duration,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(5),
            join_propagation_delay: Duration::from_millis(500),
        }
    }
}
