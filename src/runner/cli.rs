//! Command-line options

use crate::bench::BenchmarkName;
use crate::fixtures::DEFAULT_SEED;
use crate::pickle::{Protocol, HIGHEST_PROTOCOL};
use clap::{Args, Parser};

/// Test the performance of pickling.
#[derive(Parser, Debug, Clone)]
#[command(name = "pickle-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// What gets measured
    #[command(flatten)]
    pub bench: BenchArgs,

    /// How it gets measured
    #[command(flatten)]
    pub runner: RunnerArgs,
}

/// What gets measured
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BenchArgs {
    /// Use the reference (serde) implementation of pickle
    #[arg(long, visible_aliases = ["pure", "pure-python"])]
    pub reference: bool,

    /// Which protocol to use (default: highest protocol)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=i64::from(HIGHEST_PROTOCOL)))]
    pub protocol: Option<u8>,

    /// Benchmark to run
    #[arg(value_enum)]
    pub benchmark: BenchmarkName,
}

impl BenchArgs {
    /// Name reported for the run
    pub fn run_name(&self) -> String {
        if self.reference {
            format!("{}_reference", self.benchmark)
        } else {
            self.benchmark.to_string()
        }
    }
}

/// How it gets measured
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunnerArgs {
    /// Number of worker processes (0 samples in this process)
    #[arg(short, long, default_value_t = 0)]
    pub processes: usize,

    /// Number of timed samples per process
    #[arg(short = 'n', long, default_value_t = 3)]
    pub values: usize,

    /// Number of untimed warmup samples per process
    #[arg(short, long, default_value_t = 1)]
    pub warmups: usize,

    /// Outer loops per sample (default: calibrate)
    #[arg(short, long)]
    pub loops: Option<u64>,

    /// Minimum duration of one sample when calibrating
    #[arg(long, default_value_t = 100)]
    pub min_time_ms: u64,

    /// Seed of the mutated profile fixtures
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Run as a worker and print a JSON report on stdout
    #[arg(long, hide = true)]
    pub worker: bool,
}

/// Re-append the options a worker needs to measure the same configuration
pub fn prepare_subprocess_args(bench: &BenchArgs, protocol: Protocol, args: &mut Vec<String>) {
    if bench.reference {
        args.push("--reference".to_string());
    }
    args.extend(["--protocol".to_string(), protocol.to_string()]);
    args.push(bench.benchmark.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pickle-bench", "pickle"]).unwrap();
        assert_eq!(cli.bench.benchmark, BenchmarkName::Pickle);
        assert!(!cli.bench.reference);
        assert_eq!(cli.bench.protocol, None);
        assert_eq!(cli.runner.processes, 0);
        assert_eq!(cli.runner.values, 3);
        assert_eq!(cli.runner.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_unknown_benchmark_rejected() {
        let err = Cli::try_parse_from(["pickle-bench", "pickle_set"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_protocol_out_of_range_rejected() {
        let err = Cli::try_parse_from(["pickle-bench", "--protocol", "4", "pickle"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = Cli::try_parse_from(["pickle-bench", "--protocol", "x", "pickle"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_pure_alias() {
        let cli = Cli::try_parse_from(["pickle-bench", "--pure", "unpickle_list"]).unwrap();
        assert!(cli.bench.reference);
        assert_eq!(cli.bench.run_name(), "unpickle_list_reference");

        let cli = Cli::try_parse_from(["pickle-bench", "--pure-python", "pickle"]).unwrap();
        assert!(cli.bench.reference);
        assert_eq!(cli.bench.run_name(), "pickle_reference");
    }

    #[test]
    fn test_subprocess_args_roundtrip() {
        let cli = Cli::try_parse_from(["pickle-bench", "--reference", "pickle_dict"]).unwrap();
        let protocol = Protocol::resolve(cli.bench.protocol).unwrap();

        let mut args = vec!["pickle-bench".to_string(), "--worker".to_string()];
        prepare_subprocess_args(&cli.bench, protocol, &mut args);
        assert_eq!(
            &args[2..],
            &["--reference", "--protocol", "3", "pickle_dict"]
        );

        let child = Cli::try_parse_from(&args).unwrap();
        assert!(child.runner.worker);
        assert_eq!(child.bench.reference, cli.bench.reference);
        assert_eq!(child.bench.benchmark, cli.bench.benchmark);
        assert_eq!(child.bench.protocol, Some(3));
    }
}
