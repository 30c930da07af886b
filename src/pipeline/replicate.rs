//! Replicator pool: producer workers pushing block copies onto the data
//! channel.

use crossbeam_channel::Sender;
use std::thread::{self, JoinHandle};

use crate::types::Block;

/// Replica share for producer `index` out of `producers`: `replicas /
/// producers` each, with the first `replicas % producers` producers taking
/// one extra so the shares sum to `replicas` exactly.
pub fn share_for(replicas: usize, producers: usize, index: usize) -> usize {
    let base = replicas / producers;
    base + usize::from(index < replicas % producers)
}

/// Single producer: push `count` copies of the block. Each copy is a
/// reference, not a deep copy. A full channel parks the producer until a
/// digest worker drains space.
fn replicate_loop(data_tx: Sender<Block>, count: usize, block: Block) -> usize {
    for _ in 0..count {
        // The data channel is only ever closed by the producers themselves
        // dropping their senders; a failed send here is a wiring bug.
        data_tx
            .send(block.clone())
            .expect("data channel closed with producers still running");
    }
    count
}

/// Spawn the producer workers. Caller must drop its own `data_tx` after this
/// so the channel closes when the last producer finishes.
pub fn spawn_replicators(
    data_tx: &Sender<Block>,
    block: &Block,
    replicas: usize,
    producers: usize,
) -> Vec<JoinHandle<usize>> {
    (0..producers)
        .map(|i| {
            let data_tx = data_tx.clone();
            let block = block.clone();
            let share = share_for(replicas, producers, i);
            thread::spawn(move || replicate_loop(data_tx, share, block))
        })
        .collect()
}
