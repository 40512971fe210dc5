//! Accelerated pickler: bincode's native `Encode`/`Decode` path

use super::protocol::{with_config, Protocol};
use super::{Pickler, Value};
use crate::error::{PickleError, PickleResult};

/// Pickler backed by the derived bincode codecs of [`Value`]
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePickler;

impl NativePickler {
    /// Identifying name reported in benchmark metadata
    pub const NAME: &'static str = "bincode::native";

    /// Create a new native pickler
    pub fn new() -> Self {
        Self
    }
}

impl Pickler for NativePickler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_accelerated(&self) -> bool {
        true
    }

    fn dumps(&self, obj: &Value, protocol: Protocol) -> PickleResult<Vec<u8>> {
        let mut out = Vec::with_capacity(64);
        out.extend_from_slice(&protocol.header());
        with_config!(protocol, cfg => bincode::encode_into_std_write(obj, &mut out, cfg))?;
        Ok(out)
    }

    fn loads(&self, data: &[u8]) -> PickleResult<Value> {
        let (protocol, body) = Protocol::split_header(data)?;
        let (value, read) =
            with_config!(protocol, cfg => bincode::decode_from_slice::<Value, _>(body, cfg))?;
        if read != body.len() {
            return Err(PickleError::TrailingData {
                remaining: body.len() - read,
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bincode::error::DecodeError;

    /// Protocol 1 list header claiming `len` elements and carrying none
    fn oversized_list(len: u64) -> Vec<u8> {
        let mut data = Protocol::new(1).unwrap().header().to_vec();
        data.extend_from_slice(&5u32.to_le_bytes());
        data.extend_from_slice(&len.to_le_bytes());
        data
    }

    #[test]
    fn test_dumps_writes_header() {
        let pickler = NativePickler::new();
        let bytes = pickler.dumps(&Value::Int(1), Protocol::HIGHEST).unwrap();
        assert_eq!(&bytes[..2], &[0x80, 3]);
    }

    #[test]
    fn test_fixed_width_protocols_are_larger() {
        let pickler = NativePickler::new();
        let value = Value::int_list(0..10);
        let fixed = pickler.dumps(&value, Protocol::new(1).unwrap()).unwrap();
        let varint = pickler.dumps(&value, Protocol::new(3).unwrap()).unwrap();
        assert!(fixed.len() > varint.len());
    }

    #[test]
    fn test_byte_order_differs() {
        let pickler = NativePickler::new();
        let value = Value::Int(0x0102);
        let big = pickler.dumps(&value, Protocol::new(0).unwrap()).unwrap();
        let little = pickler.dumps(&value, Protocol::new(1).unwrap()).unwrap();
        assert_eq!(big.len(), little.len());
        assert_ne!(big[2..], little[2..]);
    }

    #[test]
    fn test_loads_rejects_trailing_data() {
        let pickler = NativePickler::new();
        let mut bytes = pickler.dumps(&Value::Null, Protocol::HIGHEST).unwrap();
        bytes.push(0);
        let err = pickler.loads(&bytes).unwrap_err();
        assert!(matches!(err, PickleError::TrailingData { remaining: 1 }));
    }

    #[test]
    fn test_loads_rejects_oversized_length() {
        let pickler = NativePickler::new();
        let err = pickler.loads(&oversized_list(1 << 40)).unwrap_err();
        assert!(matches!(
            err,
            PickleError::Decode(DecodeError::LimitExceeded)
        ));

        let err = pickler.loads(&oversized_list(u64::MAX)).unwrap_err();
        assert!(matches!(err, PickleError::Decode(_)));
    }
}
