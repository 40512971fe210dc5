//! Worker subprocesses

use super::report::WorkerReport;
use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Run `exe` with `args` and parse the report it prints on stdout
pub fn run_worker(exe: &Path, args: &[String]) -> Result<WorkerReport> {
    debug!(exe = %exe.display(), ?args, "spawning worker");
    let output = Command::new(exe)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()?;

    if !output.status.success() {
        return Err(Error::Worker {
            reason: format!("worker exited with {}", output.status),
        });
    }

    parse_report(&String::from_utf8_lossy(&output.stdout))
}

/// Parse the last non-empty stdout line of a worker
pub fn parse_report(stdout: &str) -> Result<WorkerReport> {
    let line = stdout
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| Error::Worker {
            reason: "worker printed no report".to_string(),
        })?;
    Ok(serde_json::from_str(line)?)
}

/// Check that a worker measured what the parent asked for
pub fn check_report(report: &WorkerReport, expected: &WorkerReport) -> Result<()> {
    if report.benchmark != expected.benchmark
        || report.module != expected.module
        || report.protocol != expected.protocol
        || report.loops != expected.loops
    {
        return Err(Error::Worker {
            reason: format!(
                "worker measured {} with {} at protocol {} ({} loops), expected {} with {} at protocol {} ({} loops)",
                report.benchmark,
                report.module,
                report.protocol,
                report.loops,
                expected.benchmark,
                expected.module,
                expected.protocol,
                expected.loops
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> WorkerReport {
        WorkerReport {
            benchmark: "pickle_list".to_string(),
            module: "bincode::serde".to_string(),
            protocol: 2,
            loops: 16,
            values: vec![0.5, 0.25],
        }
    }

    #[test]
    fn test_parse_report_takes_last_line() {
        let json = serde_json::to_string(&report()).unwrap();
        let stdout = format!("noise\n{json}\n\n");
        assert_eq!(parse_report(&stdout).unwrap(), report());
    }

    #[test]
    fn test_parse_report_empty() {
        assert!(matches!(parse_report("\n  \n"), Err(Error::Worker { .. })));
        assert!(matches!(parse_report("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_check_report() {
        let expected = WorkerReport {
            values: vec![],
            ..report()
        };
        assert!(check_report(&report(), &expected).is_ok());

        let other = WorkerReport {
            protocol: 3,
            ..report()
        };
        assert!(check_report(&other, &expected).is_err());
    }
}
