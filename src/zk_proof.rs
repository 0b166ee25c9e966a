//! Verification of the Chaum-Pedersen proof attached to partial
//! decryptions.
//!
//! The proof shows that `log_{c⁴}(c_i²) = log_v(v_i)`, i.e. that the share
//! behind the published verification element `v_i` is the one that produced
//! the partial decryption. The Fiat-Shamir challenge binds the full
//! statement: both commitments, both bases and both group elements, in
//! canonical encoding.

use num_bigint::{BigInt, Sign};
use sha2::{Digest, Sha256};

use crate::arith::mod_pow;
use crate::decryption_share::PartialDecryptionZKP;
use crate::encoding::put_uint;
use crate::error::{Error, Result};
use crate::pub_key::ThresholdPublicKey;

/// `e = SHA-256(a ‖ b ‖ c⁴ ‖ c_i² ‖ v ‖ v_i)` over canonical encodings.
/// The digest is 256 bits, so the challenge is already reduced mod 2²⁵⁶.
pub(crate) fn challenge(
    a: &BigInt,
    b: &BigInt,
    c_to_4: &BigInt,
    ci_squared: &BigInt,
    v: &BigInt,
    vi: &BigInt,
) -> BigInt {
    let mut transcript = Vec::new();
    for value in [a, b, c_to_4, ci_squared, v, vi] {
        put_uint(&mut transcript, value);
    }
    BigInt::from_bytes_be(Sign::Plus, &Sha256::digest(&transcript))
}

/// `a' = (c⁴)^z · (c_i²)^{-e} mod n²`; `None` when `c_i²` is not a unit.
fn recompute_a(
    c_to_4: &BigInt,
    ci_squared: &BigInt,
    z: &BigInt,
    e: &BigInt,
    n_squared: &BigInt,
) -> Option<BigInt> {
    let left = c_to_4.modpow(z, n_squared);
    let right = mod_pow(ci_squared, &(-e), n_squared)?;
    Some(left * right % n_squared)
}

/// `b' = v^z · v_i^{-e} mod n²`; `None` when `v_i` is not a unit.
fn recompute_b(
    v: &BigInt,
    vi: &BigInt,
    z: &BigInt,
    e: &BigInt,
    n_squared: &BigInt,
) -> Option<BigInt> {
    let left = v.modpow(z, n_squared);
    let right = mod_pow(vi, &(-e), n_squared)?;
    Some(left * right % n_squared)
}

impl PartialDecryptionZKP {
    /// Recomputes both commitments and the challenge; accepts iff the
    /// recomputed challenge equals the one in the proof. Any defect reports
    /// the offending server id.
    pub fn verify(&self, pk: &ThresholdPublicKey) -> Result<()> {
        let id = self.share.id;
        if id < 1 || id > pk.l {
            return Err(Error::InvalidProof { id });
        }
        let vi = pk
            .vi
            .get((id - 1) as usize)
            .ok_or(Error::InvalidProof { id })?;
        let n_squared = pk.key.n_squared();

        let c_to_4 = self.c.modpow(&BigInt::from(4), n_squared);
        let ci_squared = self.share.value.modpow(&BigInt::from(2), n_squared);

        let a = recompute_a(&c_to_4, &ci_squared, &self.z, &self.e, n_squared)
            .ok_or(Error::InvalidProof { id })?;
        let b = recompute_b(&pk.v, vi, &self.z, &self.e, n_squared)
            .ok_or(Error::InvalidProof { id })?;

        if challenge(&a, &b, &c_to_4, &ci_squared, &pk.v, vi) != self.e {
            return Err(Error::InvalidProof { id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ciphertext_commitment_known_value() {
        // n = 131: a' = c^{4z} · c_i^{-2e} mod n² for c = 99, c_i = 101,
        // e = 112, z = 88.
        let n_squared = BigInt::from(131 * 131);
        let c_to_4 = BigInt::from(99).modpow(&BigInt::from(4), &n_squared);
        let ci_squared = BigInt::from(101).modpow(&BigInt::from(2), &n_squared);
        let a = recompute_a(
            &c_to_4,
            &ci_squared,
            &BigInt::from(88),
            &BigInt::from(112),
            &n_squared,
        )
        .unwrap();
        assert_eq!(a, BigInt::from(11986));
    }

    #[test]
    fn verification_key_commitment_known_value() {
        // n = 131: b' = v^z · v_i^{-e} mod n² for v = 101, v_i = 77,
        // e = 112, z = 88.
        let n_squared = BigInt::from(131 * 131);
        let b = recompute_b(
            &BigInt::from(101),
            &BigInt::from(77),
            &BigInt::from(88),
            &BigInt::from(112),
            &n_squared,
        )
        .unwrap();
        assert_eq!(b, BigInt::from(14602));
    }

    #[test]
    fn challenge_depends_on_every_transcript_element() {
        let base = [
            BigInt::from(3),
            BigInt::from(5),
            BigInt::from(7),
            BigInt::from(11),
            BigInt::from(13),
            BigInt::from(17),
        ];
        let e = challenge(&base[0], &base[1], &base[2], &base[3], &base[4], &base[5]);
        for position in 0..base.len() {
            let mut mutated = base.clone();
            mutated[position] += 1;
            let e_mutated = challenge(
                &mutated[0], &mutated[1], &mutated[2], &mutated[3], &mutated[4], &mutated[5],
            );
            assert_ne!(e, e_mutated, "transcript element {position} not bound");
        }
    }
}
