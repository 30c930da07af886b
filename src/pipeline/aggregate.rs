//! Aggregator: single consumer folding records into the summary.

use crossbeam_channel::Receiver;

use crate::types::{DigestRecord, Summary};

/// Drain `record_rx` until it is closed and empty. Size and digest are
/// last-write-wins when identities collide; the per-identity record count
/// accumulates. The drain is the sole mutator of the summary.
pub fn drain_records(record_rx: Receiver<DigestRecord>) -> Summary {
    let mut summary = Summary::new();
    while let Ok(record) = record_rx.recv() {
        let stats = summary.entry(record.identity).or_default();
        stats.size = record.size;
        stats.digest = record.digest;
        stats.records += 1;
    }
    summary
}
