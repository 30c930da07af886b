//! Pipeline orchestrator: wire the channels, spawn the worker pools, drain
//! the record stream, join.

use anyhow::Result;
use log::debug;

use crate::source::BlockSource;
use crate::types::{Block, RunOpts, Summary};

use super::aggregate::drain_records;
use super::context::{PipelineHandles, create_pipeline_channels};
use super::digest::spawn_digesters;
use super::replicate::spawn_replicators;

/// Start the replicate + digest pipeline over an already-loaded block.
/// Returns handles; caller drains `record_rx` and must join when done.
/// Producer and consumer counts are clamped to at least one worker each.
pub fn run_pipeline(block: Block, opts: &RunOpts) -> PipelineHandles {
    let producers = opts.producers.max(1);
    let consumers = opts.consumers.max(1);

    let channels = create_pipeline_channels();

    let producer_handles = spawn_replicators(&channels.data_tx, &block, opts.replicas, producers);
    // Producers now hold the only data senders; the last one to finish
    // closes the data channel and the digest workers see end-of-queue.
    drop(channels.data_tx);

    let digester_handles = spawn_digesters(
        &channels.data_rx,
        &channels.record_tx,
        &channels.done,
        consumers,
        opts.with_digest,
    );
    // Same discipline downstream: the record channel closes when the last
    // digest worker exits, which is what ends the aggregator's drain.
    drop(channels.record_tx);

    PipelineHandles {
        record_rx: channels.record_rx,
        producer_handles,
        digester_handles,
        done_guard: channels.done_guard,
    }
}

/// Join the worker pools after the record stream is drained. Returns
/// `(pushed, delivered)` totals across the pools.
pub fn join_pipeline_handles(
    producer_handles: Vec<std::thread::JoinHandle<usize>>,
    digester_handles: Vec<std::thread::JoinHandle<usize>>,
) -> Result<(usize, usize)> {
    let mut pushed = 0;
    for h in producer_handles {
        pushed += h
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;
    }
    let mut delivered = 0;
    for h in digester_handles {
        delivered += h
            .join()
            .map_err(|_| anyhow::anyhow!("digest thread panicked"))?;
    }
    Ok((pushed, delivered))
}

/// Single entry point: load the block from `source`, replicate it through the
/// pipeline per `opts`, and return the finished summary.
///
/// The only error that crosses this boundary is a source load failure, which
/// surfaces before any worker is spawned. The done guard is scoped to this
/// call, so the signal is raised on every exit path before unwinding.
pub fn run(source: &dyn BlockSource, opts: &RunOpts) -> Result<Summary> {
    let block = source.load()?;

    let PipelineHandles {
        record_rx,
        producer_handles,
        digester_handles,
        done_guard,
    } = run_pipeline(block, opts);

    // Drain before joining: the record channel is a rendezvous, so a digest
    // worker can be parked in a send until the aggregator takes the record.
    let summary = drain_records(record_rx);
    let (pushed, delivered) = join_pipeline_handles(producer_handles, digester_handles)?;
    debug!(
        "pipeline done: {} pushed, {} delivered, {} identities",
        pushed,
        delivered,
        summary.len()
    );

    drop(done_guard);
    Ok(summary)
}
