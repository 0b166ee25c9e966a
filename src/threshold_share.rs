//! A single decryption server's view: its Shamir share and the operations it
//! performs with it.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::arith::random_below;
use crate::decryption_share::{PartialDecryption, PartialDecryptionZKP};
use crate::encoding::{put_u32, put_uint};
use crate::error::{Error, Result};
use crate::pub_key::ThresholdPublicKey;
use crate::zk_proof::challenge;

/// One server's share of the threshold decryption key.
#[derive(Debug, Clone)]
pub struct ThresholdPrivateKey {
    pub key: ThresholdPublicKey,
    /// Server id in `1..=l`, unique within the keyset.
    pub id: u32,
    /// Shamir share `s_id = f(id) mod nm`.
    pub share: BigInt,
}

impl Zeroize for ThresholdPrivateKey {
    fn zeroize(&mut self) {
        self.share = BigInt::zero();
    }
}

impl Drop for ThresholdPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ThresholdPrivateKey {
    /// `c_i = c^{2Δ·s_id} mod n²`.
    pub fn decrypt(&self, c: &BigInt) -> Result<PartialDecryption> {
        let n_squared = self.key.key.n_squared();
        if c.is_negative() || *c >= *n_squared {
            return Err(Error::InvalidParameter(
                "ciphertext outside [0, n²)".into(),
            ));
        }
        // The exponent lives in the integers; reducing it modulo n² would
        // change the group element.
        let exponent = BigInt::from(2) * self.key.delta() * &self.share;
        Ok(PartialDecryption {
            id: self.id,
            value: c.modpow(&exponent, n_squared),
        })
    }

    /// Partial decryption plus a Chaum-Pedersen proof that it matches the
    /// published `v_id`.
    pub fn decrypt_and_prove(
        &self,
        c: &BigInt,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<PartialDecryptionZKP> {
        let share = self.decrypt(c)?;
        if self.id < 1 || self.id > self.key.l {
            return Err(Error::InvalidParameter(
                "server id outside 1..=l".into(),
            ));
        }
        let vi = self
            .key
            .vi
            .get((self.id - 1) as usize)
            .ok_or_else(|| {
                Error::InvalidParameter("server id has no verification element".into())
            })?;
        let n_squared = self.key.key.n_squared();

        // Statistical masking: the witness Δ·s_id·e stays hidden inside a
        // randomizer sampled far above it. n² is a strict upper bound for
        // the share modulus nm, which the holder never learns.
        let bound = n_squared << (8 * ((n_squared.bits() as usize + 7) / 8));
        let r = random_below(&bound, rng)?;

        let c_to_4 = c.modpow(&BigInt::from(4), n_squared);
        let ci_squared = share.value.modpow(&BigInt::from(2), n_squared);
        let a = c_to_4.modpow(&r, n_squared);
        let b = self.key.v.modpow(&r, n_squared);
        let e = challenge(&a, &b, &c_to_4, &ci_squared, &self.key.v, vi);
        // Response over the integers, never reduced.
        let z = self.key.delta() * &self.share * &e + &r;

        Ok(PartialDecryptionZKP {
            share,
            c: c.clone(),
            e,
            z,
        })
    }

    /// Checks this share against the published verification data: the id is
    /// in range, `v_id` matches `v^{Δ·s_id}`, and a fresh
    /// encrypt-decrypt-prove round trip verifies.
    pub fn validate(&self, rng: &mut (impl CryptoRng + RngCore)) -> Result<()> {
        if self.id < 1 || self.id > self.key.l {
            return Err(Error::InvalidKey);
        }
        let vi = self
            .key
            .vi
            .get((self.id - 1) as usize)
            .ok_or(Error::InvalidKey)?;
        let n_squared = self.key.key.n_squared();
        let expected = self
            .key
            .v
            .modpow(&(self.key.delta() * &self.share), n_squared);
        if *vi != expected {
            return Err(Error::InvalidKey);
        }

        let message = random_below(&self.key.key.n, rng)?;
        let c = self.key.key.encrypt(&message, rng)?;
        let proof = self.decrypt_and_prove(&c, rng)?;
        proof.verify(&self.key).map_err(|_| Error::InvalidKey)
    }

    /// Canonical encoding `{ ThresholdPublicKey, id, share }`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.key.to_bytes();
        put_u32(&mut out, self.id);
        put_uint(&mut out, &self.share);
        out
    }
}
