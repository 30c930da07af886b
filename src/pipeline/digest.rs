//! Digest pool: consumer workers draining the data channel.

use crossbeam_channel::{Receiver, Sender, select};
use std::thread::{self, JoinHandle};

use crate::engine::hashing::hash_block;
use crate::types::{Block, DigestRecord};

use super::cancel::DoneSignal;

/// Single digest worker: pull copies until the data channel is closed and
/// empty, digest each one, and race the record send against the done signal.
/// A raised signal abandons the in-flight record and exits; delivery is
/// at-most-once under cancellation.
fn digest_loop(
    data_rx: Receiver<Block>,
    record_tx: Sender<DigestRecord>,
    done: DoneSignal,
    with_digest: bool,
) -> usize {
    let mut delivered = 0;
    while let Ok(block) = data_rx.recv() {
        let record = DigestRecord {
            identity: block.label().to_string(),
            digest: with_digest.then(|| hash_block(block.bytes())),
            size: block.len() as u64,
        };
        select! {
            send(record_tx, record) -> res => {
                if res.is_err() {
                    // Aggregator went away; nothing left to deliver to.
                    return delivered;
                }
                delivered += 1;
            }
            recv(done.rx) -> _ => return delivered,
        }
    }
    delivered
}

/// Spawn the digest workers. Caller must drop its own `record_tx` after this
/// so the record channel closes when the last worker exits.
pub fn spawn_digesters(
    data_rx: &Receiver<Block>,
    record_tx: &Sender<DigestRecord>,
    done: &DoneSignal,
    consumers: usize,
    with_digest: bool,
) -> Vec<JoinHandle<usize>> {
    (0..consumers)
        .map(|_| {
            let data_rx = data_rx.clone();
            let record_tx = record_tx.clone();
            let done = done.clone();
            thread::spawn(move || digest_loop(data_rx, record_tx, done, with_digest))
        })
        .collect()
}
