//! Object pickling facade over bincode
//!
//! This module exposes the serialization library being measured: a
//! [`Pickler`] turns a [`Value`] into bytes under a [`Protocol`] and back.
//! Two implementations exist, selected at runtime and compiled in through
//! cargo features:
//!
//! - `accelerated`: [`NativePickler`], bincode's derived codecs
//! - `reference`: [`SerdePickler`], bincode's serde path
//!
//! Loading follows an import-with-fallback model and is always verified
//! against the requested mode, see [`select_pickler`].

#[cfg(feature = "accelerated")]
pub mod native;
pub mod protocol;
#[cfg(feature = "reference")]
pub mod serde_compat;
pub mod value;

#[cfg(feature = "accelerated")]
pub use native::NativePickler;
pub use protocol::{Protocol, HIGHEST_PROTOCOL, MAX_PAYLOAD_SIZE};
#[cfg(feature = "reference")]
pub use serde_compat::SerdePickler;
pub use value::{Date, Value};

use crate::error::{Error, PickleResult, Result};
use tracing::debug;

/// Encode/decode entry points of the serialization library
pub trait Pickler {
    /// Identifying name of the implementation
    fn name(&self) -> &'static str;

    /// Whether this is the accelerated implementation
    fn is_accelerated(&self) -> bool;

    /// Highest protocol understood by this implementation
    fn highest_protocol(&self) -> Protocol {
        Protocol::HIGHEST
    }

    /// Pickle `obj` with the given protocol
    fn dumps(&self, obj: &Value, protocol: Protocol) -> PickleResult<Vec<u8>>;

    /// Unpickle a payload produced by `dumps`
    fn loads(&self, data: &[u8]) -> PickleResult<Value>;
}

/// Which implementations are compiled into the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    /// `accelerated` feature enabled
    pub accelerated: bool,
    /// `reference` feature enabled
    pub reference: bool,
}

impl Availability {
    /// Availability of the current build
    pub fn compiled() -> Self {
        Self {
            accelerated: cfg!(feature = "accelerated"),
            reference: cfg!(feature = "reference"),
        }
    }
}

/// Load a pickler, preferring the accelerated one unless it is blocked
///
/// Falls back to whatever implementation exists, so the result may not be
/// the one the caller wanted. [`select_pickler`] checks that.
pub fn load_pickler(block_accelerated: bool, available: Availability) -> Result<Box<dyn Pickler>> {
    let use_accelerated = if available.accelerated && available.reference {
        !block_accelerated
    } else if available.accelerated || available.reference {
        available.accelerated
    } else {
        return Err(Error::NoImplementation);
    };

    if use_accelerated {
        accelerated()
    } else {
        reference()
    }
}

/// Load the implementation matching `reference` and verify the result
pub fn select_pickler(reference: bool, available: Availability) -> Result<Box<dyn Pickler>> {
    let pickler = load_pickler(reference, available)?;
    debug!(
        module = pickler.name(),
        accelerated = pickler.is_accelerated(),
        "loaded pickle implementation"
    );
    match (reference, pickler.is_accelerated()) {
        (false, false) => Err(Error::MissingAccelerator {
            loaded: pickler.name().to_string(),
        }),
        (true, true) => Err(Error::UnexpectedAccelerator {
            loaded: pickler.name().to_string(),
        }),
        _ => Ok(pickler),
    }
}

#[cfg(feature = "accelerated")]
fn accelerated() -> Result<Box<dyn Pickler>> {
    Ok(Box::new(NativePickler::new()))
}

#[cfg(not(feature = "accelerated"))]
fn accelerated() -> Result<Box<dyn Pickler>> {
    Err(Error::NoImplementation)
}

#[cfg(feature = "reference")]
fn reference() -> Result<Box<dyn Pickler>> {
    Ok(Box::new(SerdePickler::new()))
}

#[cfg(not(feature = "reference"))]
fn reference() -> Result<Box<dyn Pickler>> {
    Err(Error::NoImplementation)
}
