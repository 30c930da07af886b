//! Channels and shared wiring for one pipeline run.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::thread::JoinHandle;

use crate::types::{Block, DigestRecord};
use crate::utils::config::{DATA_CHANNEL_CAP, RECORD_CHANNEL_CAP};

use super::cancel::{DoneGuard, DoneSignal, done_signal};

/// Channels for one run. Producers get `data_tx` clones; digest workers get
/// `data_rx`, `record_tx`, and the done signal; the aggregator keeps
/// `record_rx`. Each channel closes when its last sender clone drops, so the
/// close-once discipline falls out of ownership.
pub struct PipelineChannels {
    pub data_tx: Sender<Block>,
    pub data_rx: Receiver<Block>,
    pub record_tx: Sender<DigestRecord>,
    pub record_rx: Receiver<DigestRecord>,
    pub done: DoneSignal,
    pub done_guard: DoneGuard,
}

pub fn create_pipeline_channels() -> PipelineChannels {
    let (data_tx, data_rx) = bounded::<Block>(DATA_CHANNEL_CAP);
    let (record_tx, record_rx) = bounded::<DigestRecord>(RECORD_CHANNEL_CAP);
    let (done_guard, done) = done_signal();

    PipelineChannels {
        data_tx,
        data_rx,
        record_tx,
        record_rx,
        done,
        done_guard,
    }
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): drain
/// `record_rx` until it closes, then join. Joining the digest workers before
/// the drain would deadlock on the rendezvous record channel.
pub struct PipelineHandles {
    pub record_rx: Receiver<DigestRecord>,
    /// One handle per producer; each returns the number of copies it pushed.
    pub producer_handles: Vec<JoinHandle<usize>>,
    /// One handle per digest worker; each returns the number of records it
    /// delivered (an abandoned in-flight record is not counted).
    pub digester_handles: Vec<JoinHandle<usize>>,
    pub done_guard: DoneGuard,
}
