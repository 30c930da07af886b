//! Pipeline components: channels, worker pools, cancellation, aggregation.

pub mod aggregate;
pub mod cancel;
pub mod context;
pub mod digest;
pub mod orchestrator;
pub mod replicate;

pub use aggregate::drain_records;
pub use cancel::{DoneGuard, DoneSignal, done_signal};
pub use context::{PipelineChannels, PipelineHandles, create_pipeline_channels};
pub use digest::spawn_digesters;
pub use orchestrator::{join_pipeline_handles, run, run_pipeline};
pub use replicate::{share_for, spawn_replicators};
