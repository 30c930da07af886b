//! Blockmill CLI: replicate a block through the pipeline and report
//! throughput.

use anyhow::Result;
use blockmill::engine::arg_parser::Cli;
use blockmill::engine::handle_run;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
