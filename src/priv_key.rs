//! Non-threshold trapdoor decryption, for callers that hold the
//! factorization themselves. The threshold key generator uses the same
//! primes but never materializes this key.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use zeroize::Zeroize;

use crate::arith::{lcm, mod_inv};
use crate::error::{Error, Result};
use crate::pub_key::{l_function, PublicKey};

/// Plain Paillier private key: `λ = lcm(p-1, q-1)` and
/// `μ = L((1+n)^λ mod n²)^{-1} mod n`.
#[derive(Debug, Clone)]
pub struct PrivateKey {
    pub key: PublicKey,
    lambda: BigInt,
    mu: BigInt,
}

impl PrivateKey {
    /// Builds the trapdoor from the two prime factors of `n`.
    pub fn from_primes(p: &BigInt, q: &BigInt) -> Result<PrivateKey> {
        if p == q {
            return Err(Error::InvalidParameter(
                "prime factors must be distinct".into(),
            ));
        }
        let key = PublicKey::new(p * q);
        let lambda = lcm(&(p - BigInt::one()), &(q - BigInt::one()));
        // (1+n)^λ ≡ 1 + λ·n (mod n²)
        let g_to_lambda = (BigInt::one() + &lambda * &key.n).mod_floor(key.n_squared());
        let mu = mod_inv(&l_function(&g_to_lambda, &key.n), &key.n)
            .ok_or(Error::InvalidPublicKey)?;
        Ok(PrivateKey { key, lambda, mu })
    }

    /// `m = L(c^λ mod n²) · μ mod n`.
    pub fn decrypt(&self, c: &BigInt) -> Result<BigInt> {
        if c.is_negative() || *c >= *self.key.n_squared() {
            return Err(Error::InvalidParameter(
                "ciphertext outside [0, n²)".into(),
            ));
        }
        let u = c.modpow(&self.lambda, self.key.n_squared());
        Ok(l_function(&u, &self.key.n) * &self.mu % &self.key.n)
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.lambda = BigInt::zero();
        self.mu = BigInt::zero();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}
