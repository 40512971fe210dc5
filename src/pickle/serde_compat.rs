//! Reference pickler: bincode's serde compatibility path
//!
//! Produces the same bytes as [`NativePickler`](super::NativePickler) but goes
//! through `Serialize`/`Deserialize`, the generic and slower code path.

use super::protocol::{with_config, Protocol};
use super::{Pickler, Value};
use crate::error::{PickleError, PickleResult};

/// Pickler backed by the serde implementations of [`Value`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SerdePickler;

impl SerdePickler {
    /// Identifying name reported in benchmark metadata
    pub const NAME: &'static str = "bincode::serde";

    /// Create a new serde pickler
    pub fn new() -> Self {
        Self
    }
}

impl Pickler for SerdePickler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_accelerated(&self) -> bool {
        false
    }

    fn dumps(&self, obj: &Value, protocol: Protocol) -> PickleResult<Vec<u8>> {
        let mut out = Vec::with_capacity(64);
        out.extend_from_slice(&protocol.header());
        with_config!(protocol, cfg => bincode::serde::encode_into_std_write(obj, &mut out, cfg))?;
        Ok(out)
    }

    fn loads(&self, data: &[u8]) -> PickleResult<Value> {
        let (protocol, body) = Protocol::split_header(data)?;
        let (value, read) = with_config!(
            protocol,
            cfg => bincode::serde::decode_from_slice::<Value, _>(body, cfg)
        )?;
        if read != body.len() {
            return Err(PickleError::TrailingData {
                remaining: body.len() - read,
            });
        }
        Ok(value)
    }
}
