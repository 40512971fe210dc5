//! Error types for the pickle benchmark harness
//!
//! This module provides a unified error handling system using `thiserror` for
//! the pickling facade, implementation selection and the benchmark runner.

use thiserror::Error;

/// The main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    /// Pickling/unpickling errors
    #[error("Pickle error: {0}")]
    Pickle(#[from] PickleError),

    /// The accelerated implementation was requested but the reference one was loaded
    #[error("Missing accelerated implementation for pickle (loaded {loaded})")]
    MissingAccelerator {
        /// Name of the implementation that was loaded
        loaded: String,
    },

    /// The reference implementation was requested but the accelerated one was loaded
    #[error("Unexpected accelerated implementation for pickle (loaded {loaded})")]
    UnexpectedAccelerator {
        /// Name of the implementation that was loaded
        loaded: String,
    },

    /// Neither implementation is compiled in
    #[error("No pickle implementation available")]
    NoImplementation,

    /// A worker subprocess failed or produced unusable output
    #[error("Worker error: {reason}")]
    Worker {
        /// What went wrong
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is misconfigured
        message: String,
    },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON report errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the pickling facade
#[derive(Error, Debug)]
pub enum PickleError {
    /// Encoding failed inside bincode
    #[error("Encoding failed: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Decoding failed inside bincode
    #[error("Decoding failed: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Payload does not start with a protocol header
    #[error("Invalid pickle header: {reason}")]
    InvalidHeader {
        /// What is wrong with the header
        reason: String,
    },

    /// Protocol number outside of the supported range
    #[error("Unsupported pickle protocol: {protocol} (highest is {highest})")]
    UnsupportedProtocol {
        /// Requested protocol
        protocol: u8,
        /// Highest supported protocol
        highest: u8,
    },

    /// Payload has bytes left over after the object
    #[error("Trailing data after pickled object: {remaining} bytes")]
    TrailingData {
        /// Number of unread bytes
        remaining: usize,
    },
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for pickle Results
pub type PickleResult<T> = std::result::Result<T, PickleError>;
