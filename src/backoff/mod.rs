//! Retry & Backoff Module
//!
//! Wraps fallible async operations (usually one HTTP call to a peer) in a
//! bounded exponential-backoff loop with random jitter, so nodes that fail at
//! the same moment do not retry in lockstep.
//!
//! Two budgets are supported and may be combined:
//! - **Elapsed time**: stop once the next sleep would overrun the budget
//!   (gossip and increment fan-out use 10 seconds).
//! - **Attempt count**: stop after a fixed number of tries (the bootstrap
//!   join uses 5).

pub mod policy;

pub use policy::{RetryPolicy, retry};

#[cfg(test)]
mod tests;
