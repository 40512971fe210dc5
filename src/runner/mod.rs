//! Benchmark runner
//!
//! Samples one registry entry either in this process or in worker
//! subprocesses that re-run the binary with the same configuration. The
//! per-call timing of a sample is `elapsed / (loops * inner_loops)`.

pub mod cli;
pub mod report;
pub mod worker;

pub use cli::{prepare_subprocess_args, BenchArgs, Cli, RunnerArgs};
pub use report::{BenchResult, WorkerReport};

use crate::bench::{lookup, BenchmarkSpec, Workload};
use crate::error::{Error, Result};
use crate::fixtures::Fixtures;
use crate::pickle::{select_pickler, Availability, Pickler, Protocol};
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound of the calibrated loop count
pub const MAX_LOOPS: u64 = 1 << 32;

/// Description attached to every result
pub const DESCRIPTION: &str = "Test the performance of pickling.";

/// A fully resolved benchmark configuration
pub struct BenchRunner {
    bench: BenchArgs,
    config: RunnerArgs,
    protocol: Protocol,
    spec: &'static BenchmarkSpec,
    pickler: Box<dyn Pickler>,
    workload: Workload,
}

impl BenchRunner {
    /// Load the requested implementation and prepare the workload
    ///
    /// Fails immediately when the loaded implementation does not match the
    /// requested mode.
    pub fn new(bench: BenchArgs, config: RunnerArgs) -> Result<Self> {
        Self::with_availability(bench, config, Availability::compiled())
    }

    /// Same as [`BenchRunner::new`] with an explicit set of compiled implementations
    pub fn with_availability(
        bench: BenchArgs,
        config: RunnerArgs,
        available: Availability,
    ) -> Result<Self> {
        let pickler = select_pickler(bench.reference, available)?;
        let protocol = Protocol::resolve_for(bench.protocol, pickler.highest_protocol())?;
        let spec = lookup(bench.benchmark);
        let workload = Workload::prepare(pickler.as_ref(), Fixtures::new(config.seed), protocol)?;

        Ok(Self {
            bench,
            config,
            protocol,
            spec,
            pickler,
            workload,
        })
    }

    /// Effective protocol
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Name of the loaded implementation
    pub fn module(&self) -> &'static str {
        self.pickler.name()
    }

    /// Time one sample of `loops` outer iterations
    pub fn time(&self, loops: u64) -> Result<Duration> {
        (self.spec.func)(loops, self.pickler.as_ref(), &self.workload)
    }

    /// Seconds per library call for a sample
    pub fn per_call(&self, elapsed: Duration, loops: u64) -> f64 {
        elapsed.as_secs_f64() / (loops as f64 * f64::from(self.spec.inner_loops))
    }

    /// Double the loop count until one sample lasts `min_time_ms`
    pub fn calibrate(&self) -> Result<u64> {
        let min_time = Duration::from_millis(self.config.min_time_ms);
        let mut loops = 1;
        loop {
            let elapsed = self.time(loops)?;
            if elapsed >= min_time || loops >= MAX_LOOPS {
                debug!(loops, ?elapsed, "calibrated");
                return Ok(loops);
            }
            loops *= 2;
        }
    }

    /// Warm up, then collect `values` samples in this process
    pub fn sample(&self, loops: u64) -> Result<Vec<f64>> {
        for _ in 0..self.config.warmups {
            self.time(loops)?;
        }
        (0..self.config.values)
            .map(|_| self.time(loops).map(|elapsed| self.per_call(elapsed, loops)))
            .collect()
    }

    /// Report skeleton describing this configuration
    pub fn worker_report(&self, loops: u64, values: Vec<f64>) -> WorkerReport {
        WorkerReport {
            benchmark: self.bench.benchmark.to_string(),
            module: self.module().to_string(),
            protocol: self.protocol.version(),
            loops,
            values,
        }
    }

    /// Arguments of a worker subprocess
    pub fn worker_args(&self, loops: u64) -> Vec<String> {
        let mut args = vec![
            "--worker".to_string(),
            "--values".to_string(),
            self.config.values.to_string(),
            "--warmups".to_string(),
            self.config.warmups.to_string(),
            "--loops".to_string(),
            loops.to_string(),
            "--seed".to_string(),
            self.config.seed.to_string(),
        ];
        prepare_subprocess_args(&self.bench, self.protocol, &mut args);
        args
    }

    /// Sample in this process and produce the worker report
    pub fn run_worker(&self) -> Result<WorkerReport> {
        let loops = self.loops()?;
        let values = self.sample(loops)?;
        Ok(self.worker_report(loops, values))
    }

    /// Run the benchmark, spawning workers when configured to
    pub fn run(&self) -> Result<BenchResult> {
        let loops = self.loops()?;
        let mut result = BenchResult::new(self.bench.run_name())
            .with_metadata("description", DESCRIPTION)
            .with_metadata("pickle_protocol", self.protocol)
            .with_metadata("pickle_module", self.module())
            .with_metadata("loops", loops)
            .with_metadata("inner_loops", self.spec.inner_loops);

        if self.config.processes == 0 {
            result.values = self.sample(loops)?;
            return Ok(result);
        }

        let exe = std::env::current_exe()?;
        let args = self.worker_args(loops);
        let expected = self.worker_report(loops, Vec::new());
        for index in 0..self.config.processes {
            let report = worker::run_worker(&exe, &args)?;
            worker::check_report(&report, &expected)?;
            info!(
                worker = index + 1,
                of = self.config.processes,
                values = report.values.len(),
                "worker finished"
            );
            result.add_worker(report);
        }
        Ok(result)
    }

    fn loops(&self) -> Result<u64> {
        match self.config.loops {
            Some(0) => Err(Error::Configuration {
                message: "--loops must be at least 1".to_string(),
            }),
            Some(loops) => Ok(loops),
            None => self.calibrate(),
        }
    }
}

#[cfg(all(test, feature = "accelerated", feature = "reference"))]
mod tests {
    use super::*;
    use crate::bench::BenchmarkName;
    use clap::Parser;

    fn runner(args: &[&str]) -> Result<BenchRunner> {
        let cli = Cli::try_parse_from(std::iter::once("pickle-bench").chain(args.iter().copied()))
            .unwrap();
        BenchRunner::new(cli.bench, cli.runner)
    }

    #[test]
    fn test_protocol_defaults_to_highest() {
        let runner = runner(&["pickle"]).unwrap();
        assert_eq!(runner.protocol(), Protocol::HIGHEST);
        assert_eq!(runner.protocol(), runner.pickler.highest_protocol());
        assert_eq!(runner.module(), "bincode::native");
    }

    #[test]
    fn test_in_process_run() {
        let runner = runner(&["--loops", "2", "--values", "2", "--warmups", "0", "pickle_dict"])
            .unwrap();
        let result = runner.run().unwrap();
        assert_eq!(result.name, "pickle_dict");
        assert_eq!(result.values.len(), 2);
        assert!(result.values.iter().all(|v| *v >= 0.0));
        assert_eq!(result.metadata["pickle_protocol"], "3");
        assert_eq!(result.metadata["pickle_module"], "bincode::native");
        assert_eq!(result.metadata["inner_loops"], "5");
    }

    #[test]
    fn test_reference_run_name() {
        let runner = runner(&["--reference", "--protocol", "1", "--loops", "1", "unpickle"])
            .unwrap();
        let report = runner.run_worker().unwrap();
        assert_eq!(report.module, "bincode::serde");
        assert_eq!(report.protocol, 1);
        assert_eq!(report.benchmark, BenchmarkName::Unpickle.to_string());
        assert_eq!(runner.run().unwrap().name, "unpickle_reference");
    }

    #[test]
    fn test_zero_loops_rejected() {
        let runner = runner(&["--loops", "0", "pickle"]).unwrap();
        assert!(matches!(runner.run(), Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_calibrate_stops_at_min_time() {
        let runner = runner(&["--min-time-ms", "0", "pickle_list"]).unwrap();
        assert_eq!(runner.calibrate().unwrap(), 1);
    }

    #[test]
    fn test_worker_args_reparse() {
        let runner = runner(&["--reference", "--protocol", "0", "--seed", "9", "pickle_list"])
            .unwrap();
        let args = runner.worker_args(64);
        let child = Cli::try_parse_from(std::iter::once("pickle-bench".to_string()).chain(args))
            .unwrap();
        assert!(child.runner.worker);
        assert_eq!(child.runner.loops, Some(64));
        assert_eq!(child.runner.seed, 9);
        assert!(child.bench.reference);
        assert_eq!(child.bench.protocol, Some(0));
        assert_eq!(child.bench.benchmark, BenchmarkName::PickleList);
    }

    #[test]
    fn test_mismatch_is_fatal() {
        let cli = Cli::try_parse_from(["pickle-bench", "--reference", "pickle"]).unwrap();
        let only_accelerated = Availability {
            accelerated: true,
            reference: false,
        };
        let err = BenchRunner::with_availability(cli.bench, cli.runner, only_accelerated)
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnexpectedAccelerator { .. }));
    }
}
