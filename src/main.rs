//! `pickle-bench` - time pickling and unpickling of representative objects
//!
//! # Examples
//!
//! ```bash
//! # Pickle the profile fixtures with the accelerated implementation
//! pickle-bench pickle
//!
//! # Unpickle lists with the reference implementation at protocol 1
//! pickle-bench --reference --protocol 1 unpickle_list
//!
//! # Spread 20 samples over 4 worker processes
//! pickle-bench --processes 4 --values 5 pickle_dict
//! ```

use clap::Parser;
use color_eyre::Result;
use pickle_bench::runner::{BenchRunner, Cli};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    // stdout carries worker reports, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let worker = cli.runner.worker;
    let json = cli.runner.json;
    let runner = BenchRunner::new(cli.bench, cli.runner)?;
    info!(
        module = runner.module(),
        protocol = %runner.protocol(),
        "running benchmark"
    );

    if worker {
        let report = runner.run_worker()?;
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    let result = runner.run()?;
    if json {
        println!("{}", result.render_json()?);
    } else {
        println!("{}", result.render_text());
    }
    Ok(())
}
