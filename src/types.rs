//! Public and internal types for the blockmill API and pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use memmap2::Mmap;

use crate::utils::config::PipelineDefaults;

/// Backing store of a block: owned buffer for small sources, retained memory
/// mapping for large ones.
#[derive(Debug)]
enum BlockData {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

#[derive(Debug)]
struct BlockInner {
    label: String,
    data: BlockData,
}

/// One immutable data block, shared by reference across all producer workers.
///
/// Cloning bumps a reference count; the bytes are never copied and never
/// mutated after load. The label doubles as the identity of every record
/// digested from the block, so a single run collapses to one summary entry.
#[derive(Clone, Debug)]
pub struct Block {
    inner: Arc<BlockInner>,
}

impl Block {
    /// Build a block from an owned buffer.
    pub fn from_vec(label: impl Into<String>, data: Vec<u8>) -> Block {
        Block {
            inner: Arc::new(BlockInner {
                label: label.into(),
                data: BlockData::Owned(data),
            }),
        }
    }

    /// Build a block over a retained memory mapping.
    pub(crate) fn from_mmap(label: impl Into<String>, map: Mmap) -> Block {
        Block {
            inner: Arc::new(BlockInner {
                label: label.into(),
                data: BlockData::Mapped(map),
            }),
        }
    }

    /// Identity carried by every record digested from this block.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.inner.data {
            BlockData::Owned(v) => v,
            BlockData::Mapped(m) => m,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    /// Live references to the backing store, this one included. Every worker
    /// clone is dropped before [`run`](crate::pipeline::run) returns, so the
    /// count settles back to what the caller holds.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

/// Product of digesting one replicated block copy. Owned by the digest worker
/// that built it until handed to the aggregator.
#[derive(Clone, Debug)]
pub struct DigestRecord {
    /// Identity the aggregator keys on (the block label).
    pub identity: String,
    /// Blake3 digest of the copy, or `None` on size-only runs.
    pub digest: Option<[u8; 32]>,
    pub size: u64,
}

/// Accumulated stats for one identity. Size and digest are last-write-wins
/// when identities collide; the record count keeps what the collision drops.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockStats {
    pub size: u64,
    pub digest: Option<[u8; 32]>,
    pub records: u64,
}

/// Map of identity → accumulated stats, finalized only after the record
/// channel closes. Returned by [`run`](crate::pipeline::run).
pub type Summary = HashMap<String, BlockStats>;

/// Options for one pipeline run.
#[derive(Clone, Debug)]
pub struct RunOpts {
    /// Producer worker count. Clamped to at least 1.
    pub producers: usize,
    /// Digest worker count. Clamped to at least 1.
    pub consumers: usize,
    /// Total block copies pushed through the pipeline.
    pub replicas: usize,
    /// Compute the blake3 digest per copy. When false, records carry only the
    /// size (measures the channel skeleton rather than hashing).
    pub with_digest: bool,
}

impl Default for RunOpts {
    fn default() -> Self {
        RunOpts {
            producers: PipelineDefaults::PRODUCERS,
            consumers: PipelineDefaults::default_consumers(),
            replicas: PipelineDefaults::REPLICAS,
            with_digest: true,
        }
    }
}
