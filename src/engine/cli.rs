//! CLI command handler: load the block, run the benchmark matrix, print the
//! report.

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::engine::arg_parser::Cli;
use crate::engine::report::{BenchReport, IterationReport, print_report, print_summary};
use crate::pipeline::run;
use crate::source::{BlockSource, FileSource};
use crate::types::RunOpts;
use crate::utils::config::PipelineDefaults;
use crate::utils::setup_logging;

fn setup_opts(cli: &Cli) -> RunOpts {
    setup_logging(cli.verbose);
    RunOpts {
        producers: cli.producers,
        consumers: cli
            .consumers
            .unwrap_or_else(PipelineDefaults::default_consumers),
        replicas: cli.replicas,
        with_digest: !cli.size_only,
    }
}

/// Run the benchmark: one configuration, or one per `--sweep` value, each
/// timed `--iterations` times. Ctrl+C stops after the current run; results
/// collected so far are still reported.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli);
    debug!("available threads: {}", rayon::current_num_threads());

    let cancel_requested = Arc::new(AtomicBool::new(false));
    let cancel_requested_handler = Arc::clone(&cancel_requested);
    ctrlc::set_handler(move || {
        cancel_requested_handler.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;

    // Load once; reruns replicate from memory so file I/O stays out of the
    // timings.
    let block = FileSource::new(&cli.file).load()?;
    debug!("loaded block {} ({} bytes)", block.label(), block.len());

    let consumer_counts = if cli.sweep.is_empty() {
        vec![opts.consumers]
    } else {
        cli.sweep.clone()
    };

    let mut report = BenchReport {
        block_label: block.label().to_string(),
        block_size: block.len() as u64,
        iterations: Vec::new(),
    };

    'sweep: for &consumers in &consumer_counts {
        let run_opts = RunOpts {
            consumers,
            ..opts.clone()
        };
        for iteration in 0..cli.iterations.max(1) {
            if cancel_requested.load(Ordering::Relaxed) {
                info!("cancelled; reporting results collected so far");
                break 'sweep;
            }
            let start = Instant::now();
            let summary = run(&block, &run_opts)?;
            let elapsed = start.elapsed();
            if cli.verbose && iteration == 0 {
                print_summary(&summary);
            }
            report
                .iterations
                .push(IterationReport::from_run(&run_opts, elapsed, &summary));
        }
    }

    print_report(&report, cli.json)
}
