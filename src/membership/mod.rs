//! Membership & Discovery Module
//!
//! Maintains this node's view of which other nodes exist. Membership is
//! learned, not configured: a node starts from a seed list and grows its view
//! through join handshakes and gossip.
//!
//! ## Core Mechanisms
//! - **Join Handshake**: A newcomer posts its address to a known node, which
//!   registers it and answers with its full peer list.
//! - **Gossip Propagation**: After a short delay, the receiving node announces
//!   the newcomer to all of its peers. A seen-set suppresses re-announcements,
//!   so gossip about one node stops after a single round per node.
//! - **Heartbeat Eviction**: Every few seconds each peer is pinged; peers that
//!   fail are dropped locally. There is no blacklist, so an evicted peer that
//!   is announced again simply rejoins.

pub mod handlers;
pub mod protocol;
pub mod service;
pub mod types;
