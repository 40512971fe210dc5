//! Pickle protocol numbers and the payload header
//!
//! A protocol is a revision of the bincode configuration used for the
//! payload body. Every payload starts with `PROTO_OPCODE` followed by the
//! protocol number so that `loads` can pick the matching configuration.

use crate::error::{PickleError, PickleResult};
use std::fmt;

/// First byte of every pickled payload
pub const PROTO_OPCODE: u8 = 0x80;

/// Size of the payload header in bytes
pub const HEADER_LEN: usize = 2;

/// The highest protocol this library speaks
pub const HIGHEST_PROTOCOL: u8 = 3;

/// Upper bound on the bytes a decoder may claim for one payload
///
/// Length prefixes are checked against it before anything is allocated.
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

/// A validated protocol number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Protocol(u8);

impl Protocol {
    /// The highest supported protocol
    pub const HIGHEST: Protocol = Protocol(HIGHEST_PROTOCOL);

    /// Validate a protocol number
    pub fn new(version: u8) -> PickleResult<Self> {
        if version > HIGHEST_PROTOCOL {
            return Err(PickleError::UnsupportedProtocol {
                protocol: version,
                highest: HIGHEST_PROTOCOL,
            });
        }
        Ok(Self(version))
    }

    /// Resolve an optional command-line value, defaulting to the highest protocol
    pub fn resolve(requested: Option<u8>) -> PickleResult<Self> {
        Self::resolve_for(requested, Self::HIGHEST)
    }

    /// Resolve an optional command-line value against an implementation's
    /// highest protocol, which is also the default
    pub fn resolve_for(requested: Option<u8>, highest: Protocol) -> PickleResult<Self> {
        match requested {
            None => Ok(highest),
            Some(version) if version > highest.0 => Err(PickleError::UnsupportedProtocol {
                protocol: version,
                highest: highest.0,
            }),
            Some(version) => Self::new(version),
        }
    }

    /// All supported protocols, lowest first
    pub fn all() -> impl Iterator<Item = Protocol> {
        (0..=HIGHEST_PROTOCOL).map(Protocol)
    }

    /// The raw protocol number
    pub fn version(self) -> u8 {
        self.0
    }

    /// The two header bytes that open a payload
    pub fn header(self) -> [u8; HEADER_LEN] {
        [PROTO_OPCODE, self.0]
    }

    /// Split a payload into its protocol and body
    pub fn split_header(data: &[u8]) -> PickleResult<(Self, &[u8])> {
        match data {
            [PROTO_OPCODE, version, body @ ..] => Ok((Self::new(*version)?, body)),
            [other, _, ..] => Err(PickleError::InvalidHeader {
                reason: format!("expected opcode 0x{PROTO_OPCODE:02x}, got 0x{other:02x}"),
            }),
            _ => Err(PickleError::InvalidHeader {
                reason: format!("payload is {} bytes long", data.len()),
            }),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Run `$body` with `$cfg` bound to the bincode configuration of `$protocol`
///
/// | protocol | byte order | integers |
/// |---|---|---|
/// | 0 | big endian | fixed |
/// | 1 | little endian | fixed (legacy) |
/// | 2 | big endian | varint |
/// | 3 | little endian | varint (standard) |
///
/// Every configuration is capped at [`MAX_PAYLOAD_SIZE`].
macro_rules! with_config {
    ($protocol:expr, $cfg:ident => $body:expr) => {{
        use bincode::config;
        use $crate::pickle::protocol::MAX_PAYLOAD_SIZE;
        match $protocol.version() {
            0 => {
                let $cfg = config::standard()
                    .with_big_endian()
                    .with_fixed_int_encoding()
                    .with_limit::<MAX_PAYLOAD_SIZE>();
                $body
            }
            1 => {
                let $cfg = config::legacy().with_limit::<MAX_PAYLOAD_SIZE>();
                $body
            }
            2 => {
                let $cfg = config::standard()
                    .with_big_endian()
                    .with_limit::<MAX_PAYLOAD_SIZE>();
                $body
            }
            _ => {
                let $cfg = config::standard().with_limit::<MAX_PAYLOAD_SIZE>();
                $body
            }
        }
    }};
}

pub(crate) use with_config;
