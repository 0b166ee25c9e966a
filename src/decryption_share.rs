use num_bigint::BigInt;

use crate::encoding::{put_u32, put_uint};

/// One server's contribution `c_i = c^{2Δ·s_i} mod n²` to a threshold
/// decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialDecryption {
    /// Server id in `1..=l`.
    pub id: u32,
    pub value: BigInt,
}

impl PartialDecryption {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, self.id);
        put_uint(&mut out, &self.value);
        out
    }
}

/// A partial decryption together with the Chaum-Pedersen proof that it was
/// computed with the share behind the published `v_i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialDecryptionZKP {
    pub share: PartialDecryption,
    /// The ciphertext this partial decryption refers to.
    pub c: BigInt,
    /// Fiat-Shamir challenge.
    pub e: BigInt,
    /// Response `z = Δ·s_i·e + r`, taken over the integers.
    pub z: BigInt,
}

impl PartialDecryptionZKP {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.share.to_bytes();
        put_uint(&mut out, &self.c);
        put_uint(&mut out, &self.e);
        put_uint(&mut out, &self.z);
        out
    }
}
