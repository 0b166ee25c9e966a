//! Canonical byte encoding of the engine's data objects.
//!
//! Integers are encoded as their unsigned big-endian magnitude prefixed with
//! a 32-bit big-endian byte count; `u32` fields are 4 big-endian bytes. The
//! Fiat-Shamir transcript hashes exactly this encoding, and the `to_bytes`
//! methods on the key and share types compose it for callers that need a
//! stable serialization.

use num_bigint::BigInt;

/// Appends the length-prefixed big-endian magnitude of `value`.
///
/// Inputs are treated as non-negative; callers reduce into canonical range
/// first.
pub fn put_uint(out: &mut Vec<u8>, value: &BigInt) {
    let bytes = value.magnitude().to_bytes_be();
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(&bytes);
}

pub fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}
