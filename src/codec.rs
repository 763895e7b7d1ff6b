//! Payload codecs
//!
//! The engine stores and returns raw byte sequences only; turning an
//! application type into bytes and back is the caller's concern, plugged
//! in through the [`Codec`] trait. [`BincodeCodec`] is the provided
//! default for any serde type.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Encodes and decodes payloads at the store boundary
///
/// Implementations must round-trip: `decode(encode(v))` yields a value
/// equal to `v`. Encode failures map to [`StoreError::Serialization`],
/// decode failures to [`StoreError::Deserialization`].
pub trait Codec<T> {
    /// Encode a value to the bytes the store will persist
    fn encode(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode a value from bytes previously returned by `encode`
    fn decode(&self, bytes: &[u8]) -> Result<T>;
}

/// Default codec: compact binary encoding via bincode
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl<T> Codec<T> for BincodeCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<T> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Person {
        name: String,
        age: u32,
    }

    #[test]
    fn bincode_round_trip() {
        let codec = BincodeCodec;
        let person = Person {
            name: "alice".to_string(),
            age: 30,
        };

        let bytes = codec.encode(&person).unwrap();
        let decoded: Person = codec.decode(&bytes).unwrap();

        assert_eq!(decoded, person);
    }

    #[test]
    fn decode_garbage_fails() {
        let codec = BincodeCodec;

        let result: Result<Person> = codec.decode(b"\xff\xff\xff");

        assert!(matches!(result, Err(StoreError::Deserialization(_))));
    }
}
