//! Counter Network Protocol
//!
//! Endpoints and DTOs for increments and count reads. Propagated increments
//! use the same endpoint as client increments; only the `node_id` differs.

use serde::{Deserialize, Serialize};

use crate::membership::types::NodeId;

/// Apply one increment (client-facing or propagated).
pub const ENDPOINT_INCREMENT: &str = "/increment";
/// Read the local counter value.
pub const ENDPOINT_COUNT: &str = "/count";

/// Body of an increment request.
///
/// A client sets `node_id` to the address of the node it is talking to,
/// which makes that node the origin and triggers propagation. Peers set it
/// to their own address, so the receiver applies it without forwarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementRequest {
    pub node_id: NodeId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub count: u64,
}
