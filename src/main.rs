//! sfid CLI: UUID v5 identifiers and digests for a string, a file or a directory.

use anyhow::Result;
use clap::Parser;
use sfid::engine::arg_parser::Cli;
use sfid::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
