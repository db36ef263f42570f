//! Replicated Counter Module
//!
//! One integer, replicated to every node by best-effort propagation.
//!
//! ## Core Concepts
//! - **Deduplication**: Each applied increment is recorded as
//!   `(origin, request id)`; a replayed pair is a no-op.
//! - **Origin-based forwarding**: Only the node a client talked to forwards
//!   the increment. Forwarded copies name the sender as origin and stop there.
//! - **Monotone merge**: `set_count` never lowers the value, so syncing from
//!   a stale peer is harmless.
//!
//! Request ids are generated per inbound call, so a propagation retried after
//! a lost response is counted again at its target. Convergence is eventual
//! and approximate, not exactly-once.

pub mod handlers;
pub mod protocol;
pub mod service;
pub mod types;
