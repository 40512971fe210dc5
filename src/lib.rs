//! # pickle-bench
//!
//! Micro-benchmarks for pickling and unpickling representative object graphs
//! with bincode. The harness exists to catch regressions in the library's
//! encode/decode paths, not to implement serialization itself.
//!
//! ## Modules
//!
//! - **Pickle Module**: the object model and the two picklers being measured
//! - **Fixtures Module**: the seeded benchmark inputs
//! - **Bench Module**: timed operations and the benchmark registry
//! - **Runner Module**: command-line options, sampling and worker processes
//!
//! ## Optional Features
//!
//! - `accelerated`: bincode's native `Encode`/`Decode` pickler (default)
//! - `reference`: bincode's serde pickler (default)
//!
//! ## Example
//!
//! ```rust
//! use pickle_bench::bench::{lookup, BenchmarkName, Workload};
//! use pickle_bench::fixtures::Fixtures;
//! use pickle_bench::pickle::{select_pickler, Availability, Protocol};
//!
//! let pickler = select_pickler(false, Availability::compiled())?;
//! let workload = Workload::prepare(pickler.as_ref(), Fixtures::default(), Protocol::HIGHEST)?;
//! let spec = lookup(BenchmarkName::PickleList);
//! let elapsed = (spec.func)(4, pickler.as_ref(), &workload)?;
//! println!("{:?} per call", elapsed / (4 * spec.inner_loops));
//! # Ok::<(), pickle_bench::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core error types
pub use error::{Error, Result};

// Core modules
pub mod bench;
pub mod error;
pub mod fixtures;
pub mod pickle;
pub mod runner;

// Utility modules
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::bench::{lookup, BenchmarkName, BenchmarkSpec, Workload, BENCHMARKS};
    pub use crate::error::{Error, PickleError, Result};
    pub use crate::fixtures::Fixtures;
    pub use crate::pickle::{select_pickler, Availability, Pickler, Protocol, Value};
}

// Version information
/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
