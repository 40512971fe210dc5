//! Timed operations and the benchmark registry
//!
//! A [`Workload`] bundles the fixtures, the protocol and every pre-encoded
//! payload so the timed operations in [`operations`] do no setup work.

pub mod operations;
pub mod registry;

pub use operations::TimedOp;
pub use registry::{lookup, BenchmarkName, BenchmarkSpec, BENCHMARKS};

use crate::error::Result;
use crate::fixtures::Fixtures;
use crate::pickle::{Pickler, Protocol};
use tracing::debug;

/// Payloads decoded by the unpickle benchmarks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFixtures {
    /// Pickled profile record
    pub dict: Vec<u8>,
    /// Pickled numeric tuple
    pub tuple: Vec<u8>,
    /// Pickled mutated profile group
    pub dict_group: Vec<u8>,
    /// Pickled list of lists
    pub list: Vec<u8>,
}

impl EncodedFixtures {
    /// The payloads decoded together by the `unpickle` benchmark
    pub fn record_payloads(&self) -> [&[u8]; 3] {
        [
            self.dict.as_slice(),
            self.tuple.as_slice(),
            self.dict_group.as_slice(),
        ]
    }

    /// Total payload size in bytes
    pub fn total_len(&self) -> usize {
        self.dict.len() + self.tuple.len() + self.dict_group.len() + self.list.len()
    }
}

/// Everything a timed operation reads
#[derive(Debug, Clone)]
pub struct Workload {
    /// Objects to pickle
    pub fixtures: Fixtures,
    /// Protocol passed to every `dumps`
    pub protocol: Protocol,
    /// Objects to unpickle
    pub encoded: EncodedFixtures,
}

impl Workload {
    /// Pickle the fixtures once so the unpickle benchmarks have input
    pub fn prepare(pickler: &dyn Pickler, fixtures: Fixtures, protocol: Protocol) -> Result<Self> {
        let encoded = EncodedFixtures {
            dict: pickler.dumps(&fixtures.dict, protocol)?,
            tuple: pickler.dumps(&fixtures.tuple, protocol)?,
            dict_group: pickler.dumps(&fixtures.dict_group, protocol)?,
            list: pickler.dumps(&fixtures.list, protocol)?,
        };
        debug!(
            module = pickler.name(),
            %protocol,
            bytes = encoded.total_len(),
            "prepared workload"
        );
        Ok(Self {
            fixtures,
            protocol,
            encoded,
        })
    }
}
