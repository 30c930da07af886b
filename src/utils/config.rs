//! Application configuration constants.
//! Tuning and thresholds in one place.

// ---- Channels ----

/// Data channel capacity. Producers park here when the digest workers fall
/// behind.
pub const DATA_CHANNEL_CAP: usize = 50;

/// Record channel capacity. Zero: a rendezvous hand-off, so a digest worker
/// stays parked in its send until the aggregator takes the record or the done
/// signal is raised.
pub const RECORD_CHANNEL_CAP: usize = 0;

// ---- Block loading ----

/// Block source I/O thresholds.
pub struct SourceConsts;

impl SourceConsts {
    /// File size above which loading memory-maps the file instead of reading
    /// it into a buffer (bytes). 100 MB.
    pub const MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;
    /// Chunk size for buffered reads below the mmap threshold (bytes). 1 MB.
    pub const READ_CHUNK_SIZE: usize = 1024 * 1024;
}

// ---- Workload defaults ----

/// Default workload when the harness is not told otherwise.
pub struct PipelineDefaults;

impl PipelineDefaults {
    pub const PRODUCERS: usize = 4;
    pub const REPLICAS: usize = 1000;
    /// Minimum digest worker count.
    pub const CONSUMER_FLOOR: usize = 1;

    /// Digest worker default: available threads, floored.
    pub fn default_consumers() -> usize {
        rayon::current_num_threads().max(Self::CONSUMER_FLOOR)
    }
}
