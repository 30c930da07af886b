//! Blockmill: bounded fan-out/fan-in digest pipeline micro-benchmark
//!
//! A set of producer workers replicates one immutable data block into a
//! bounded channel; a set of digest workers drains it, hashes each copy, and
//! hands records to a single aggregator. The interesting part is the
//! concurrency skeleton: bounded-channel backpressure, half-close propagation
//! for shutdown, a single-shot done signal for cooperative cancellation, and
//! a lifecycle that leaves no worker thread behind.

pub mod engine;
pub mod pipeline;
pub mod source;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use source::{BlockSource, FileSource};
pub use types::*;

/// Result alias used by the public blockmill API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub use pipeline::run;
