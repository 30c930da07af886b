//! Benchmark report: per-iteration timing and throughput, human or JSON.

use anyhow::Result;
use serde::Serialize;
use std::time::Duration;

use crate::engine::hashing::hash_hex;
use crate::types::{RunOpts, Summary};

/// One timed pipeline run.
#[derive(Clone, Debug, Serialize)]
pub struct IterationReport {
    pub producers: usize,
    pub consumers: usize,
    pub replicas: usize,
    pub elapsed_ms: f64,
    /// Records aggregated across all identities.
    pub records: u64,
    /// Bytes digested (records × block size).
    pub bytes: u64,
    pub throughput_mib_s: f64,
}

impl IterationReport {
    pub fn from_run(opts: &RunOpts, elapsed: Duration, summary: &Summary) -> IterationReport {
        let records: u64 = summary.values().map(|s| s.records).sum();
        let bytes: u64 = summary.values().map(|s| s.records * s.size).sum();
        let secs = elapsed.as_secs_f64();
        let throughput_mib_s = if secs > 0.0 {
            bytes as f64 / (1024.0 * 1024.0) / secs
        } else {
            0.0
        };
        IterationReport {
            producers: opts.producers,
            consumers: opts.consumers,
            replicas: opts.replicas,
            elapsed_ms: secs * 1000.0,
            records,
            bytes,
            throughput_mib_s,
        }
    }
}

/// Full harness output: the block that was milled and every timed iteration.
#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub block_label: String,
    pub block_size: u64,
    pub iterations: Vec<IterationReport>,
}

/// Print summary entries sorted by identity (size, identity, record count,
/// digest when present).
pub fn print_summary(summary: &Summary) {
    let mut identities: Vec<&String> = summary.keys().collect();
    identities.sort();
    for identity in identities {
        let stats = &summary[identity];
        match &stats.digest {
            Some(digest) => println!(
                "{}  {}  {} records  {}",
                stats.size,
                identity,
                stats.records,
                hash_hex(digest)
            ),
            None => println!("{}  {}  {} records", stats.size, identity, stats.records),
        }
    }
}

/// Print the report: pretty JSON with `--json`, one line per iteration
/// otherwise.
pub fn print_report(report: &BenchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!(
        "block: {} ({} bytes)",
        report.block_label, report.block_size
    );
    for it in &report.iterations {
        println!(
            "p={} c={} r={}  {:>8.2} ms  {} records  {:.1} MiB/s",
            it.producers, it.consumers, it.replicas, it.elapsed_ms, it.records, it.throughput_mib_s
        );
    }
    Ok(())
}
