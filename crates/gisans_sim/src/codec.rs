//! MessagePack codec helpers.
//!
//! Thin wrappers around `rmp-serde` for encoding and decoding simulation
//! descriptions and results. All persisted payloads use MessagePack for
//! compact binary serialisation.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Encode a value to MessagePack bytes.
///
/// # Errors
///
/// Returns [`SimError::Encode`] if serialisation fails.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, SimError> {
    rmp_serde::to_vec(value).map_err(SimError::Encode)
}

/// Decode a value from MessagePack bytes.
///
/// # Errors
///
/// Returns [`SimError::Decode`] if deserialisation fails.
pub fn decode<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, SimError> {
    rmp_serde::from_slice(bytes).map_err(SimError::Decode)
}
