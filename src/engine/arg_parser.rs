use clap::Parser;
use std::path::PathBuf;

use crate::utils::config::PipelineDefaults;

/// Bounded fan-out/fan-in digest pipeline micro-benchmark.
#[derive(Clone, Parser)]
#[command(name = "blockmill")]
#[command(about = "Replicate a data block through a bounded pipeline and measure digest throughput.")]
pub struct Cli {
    /// Block file to replicate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Producer worker count.
    #[arg(long, short = 'p', default_value_t = PipelineDefaults::PRODUCERS)]
    pub producers: usize,

    /// Digest worker count. Default: available threads.
    #[arg(long, short = 'c')]
    pub consumers: Option<usize>,

    /// Total block copies pushed through the pipeline per run.
    #[arg(long, short = 'r', default_value_t = PipelineDefaults::REPLICAS)]
    pub replicas: usize,

    /// Timed runs per configuration.
    #[arg(long, short = 'i', default_value_t = 1)]
    pub iterations: usize,

    /// Sweep digest worker counts, one configuration per value (overrides
    /// --consumers). Example: --sweep 1 4 12
    #[arg(long, num_args = 1..)]
    pub sweep: Vec<usize>,

    /// Skip digest computation; records carry only the size.
    #[arg(long)]
    pub size_only: bool,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Verbose output (debug logging, per-identity summary).
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
