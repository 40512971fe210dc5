//! Benchmark results and their rendering

use crate::error::Result;
use crate::utils::{format_seconds, mean, stdev};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// What a worker process prints on stdout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerReport {
    /// Benchmark name
    pub benchmark: String,
    /// Loaded implementation
    pub module: String,
    /// Protocol used for `dumps`
    pub protocol: u8,
    /// Outer loops per sample
    pub loops: u64,
    /// Seconds per library call, one entry per sample
    pub values: Vec<f64>,
}

/// Aggregated result of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchResult {
    /// Run name, suffixed for the reference implementation
    pub name: String,
    /// Run metadata (`pickle_protocol`, `pickle_module`, ...)
    pub metadata: BTreeMap<String, String>,
    /// Seconds per library call
    pub values: Vec<f64>,
}

impl BenchResult {
    /// Create an empty result
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: BTreeMap::new(),
            values: Vec::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: &str, value: impl ToString) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    /// Merge the samples of a worker
    pub fn add_worker(&mut self, report: WorkerReport) {
        self.values.extend(report.values);
    }

    /// Mean seconds per call
    pub fn mean(&self) -> Option<f64> {
        mean(&self.values)
    }

    /// Standard deviation of the seconds per call
    pub fn stdev(&self) -> Option<f64> {
        stdev(&self.values)
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        match (self.mean(), self.stdev()) {
            (Some(mean), Some(sd)) => format!(
                "{}: Mean +- std dev: {} +- {}",
                self.name,
                format_seconds(mean),
                format_seconds(sd)
            ),
            (Some(mean), None) => format!("{}: {}", self.name, format_seconds(mean)),
            _ => format!("{}: no values", self.name),
        }
    }

    /// Human readable report: metadata followed by the summary
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.metadata {
            let _ = writeln!(out, "{key}: {value}");
        }
        let _ = writeln!(out, "values: {}", self.values.len());
        out.push_str(&self.summary());
        out
    }

    /// Pretty JSON report
    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
