//! Configuration for a counter node.
//!
//! Everything comes from the environment (optionally a `.env` file) or the
//! matching command-line flags.

use clap::Parser;
use std::time::Duration;

use crate::backoff::RetryPolicy;
use crate::client::DEFAULT_REQUEST_TIMEOUT;
use crate::membership::types::{MembershipConfig, NodeId};

/// Distributed counter node
#[derive(Parser, Debug, Clone)]
#[command(name = "counter-node")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// This node's address, used both as its id and as the listen address
    #[arg(long, env = "NODE_ID")]
    pub node_id: String,

    /// Comma-separated seed peers (host:port)
    #[arg(long, env = "PEERS", value_delimiter = ',')]
    pub peers: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    pub json_logs: bool,
}

/// Resolved settings for one node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub node_id: NodeId,
    pub seeds: Vec<NodeId>,
    pub membership: MembershipConfig,
    /// Timeout of a single outbound request, heartbeat probes included.
    pub request_timeout: Duration,
    pub propagation_retry: RetryPolicy,
    pub join_retry: RetryPolicy,
}

impl NodeConfig {
    pub fn new(node_id: NodeId, seeds: Vec<NodeId>) -> Self {
        Self {
            node_id,
            seeds,
            membership: MembershipConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            propagation_retry: RetryPolicy::propagation(),
            join_retry: RetryPolicy::join(),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(
            NodeId::new(args.node_id.trim()),
            parse_peers(&args.peers),
        )
    }
}

/// Trims entries and drops blanks (`PEERS="a:1, ,b:2,"`).
pub fn parse_peers(raw: &[String]) -> Vec<NodeId> {
    raw.iter()
        .map(|peer| peer.trim())
        .filter(|peer| !peer.is_empty())
        .map(NodeId::from)
        .collect()
}
