//! Distributed Counter Library
//!
//! A self-organizing cluster of nodes that keeps one replicated counter.
//! Each node accepts increments, applies them locally and forwards them to
//! every peer it knows about; peers are discovered through a join handshake
//! and gossip instead of static configuration.
//!
//! ## Architecture Modules
//! - **`backoff`**: Bounded exponential-backoff retry with jitter, shared by
//!   every outbound fan-out.
//! - **`membership`**: Peer set, join handshake, gossip with loop
//!   suppression, heartbeat eviction.
//! - **`counter`**: Counter value with per-origin deduplication, increment
//!   propagation and monotone merge.
//! - **`bootstrap`**: Startup count sync and cluster join through seed peers.
//! - **`node`**: Assembles the services into an axum router and runs them.
//! - **`client`**, **`config`**, **`error`**: HTTP client for peer calls,
//!   environment configuration, error types.

pub mod backoff;
pub mod bootstrap;
pub mod client;
pub mod config;
pub mod counter;
pub mod error;
pub mod membership;
pub mod node;

#[cfg(test)]
pub(crate) mod test_support;
