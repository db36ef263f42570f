//! Bootstrap Module
//!
//! Brings a freshly started node into an existing cluster.
//!
//! 1. **Count sync**: Ask the seeds for their counter value, one at a time,
//!    and merge the first answer. State is not persisted, so this is how a
//!    restarted node recovers.
//! 2. **Join**: Post our address to the seeds in order, retrying each with
//!    exponential backoff, and register every peer the accepting seed knows.

pub mod orchestrator;

pub use orchestrator::Bootstrap;
