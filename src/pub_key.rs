//! Paillier public keys: encryption, the homomorphic operations, and the
//! threshold share combiner.

use std::collections::HashSet;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::{CryptoRng, RngCore};

use crate::arith::{factorial, mod_inv, mod_pow, random_coprime_below};
use crate::decryption_share::{PartialDecryption, PartialDecryptionZKP};
use crate::encoding::{put_u32, put_uint};
use crate::error::{Error, Result};

/// `L(u) = (u - 1) / n`, the Paillier logarithm helper. Only meaningful when
/// `u ≡ 1 (mod n)`; plain integer division otherwise.
pub fn l_function(u: &BigInt, n: &BigInt) -> BigInt {
    (u - BigInt::one()) / n
}

/// A plain Paillier public key: the modulus `n` with its square cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// Modulus, product of two safe primes.
    pub n: BigInt,
    n_squared: BigInt,
}

impl PublicKey {
    pub fn new(n: BigInt) -> Self {
        let n_squared = &n * &n;
        PublicKey { n, n_squared }
    }

    pub fn n_squared(&self) -> &BigInt {
        &self.n_squared
    }

    /// Encrypts `message ∈ [0, n)` as `(1 + m·n) · r^n mod n²` with `r`
    /// uniform in `Z*_n`. The `(1+n)^m ≡ 1 + m·n (mod n²)` identity saves
    /// one exponentiation.
    pub fn encrypt(
        &self,
        message: &BigInt,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<BigInt> {
        if message.is_negative() || *message >= self.n {
            return Err(Error::InvalidParameter(
                "message outside [0, n)".into(),
            ));
        }
        let r = random_coprime_below(&self.n, rng)?;
        let g_to_m = (BigInt::one() + message * &self.n).mod_floor(&self.n_squared);
        let r_to_n = r.modpow(&self.n, &self.n_squared);
        Ok(g_to_m * r_to_n % &self.n_squared)
    }

    /// Homomorphic addition: the plaintext of the result is
    /// `m1 + m2 mod n`.
    pub fn eadd(&self, c1: &BigInt, c2: &BigInt) -> Result<BigInt> {
        self.check_ciphertext(c1)?;
        self.check_ciphertext(c2)?;
        Ok(c1 * c2 % &self.n_squared)
    }

    /// Homomorphic scalar multiplication: the plaintext of the result is
    /// `scalar · m mod n`. Negative scalars invert the ciphertext first.
    pub fn emul_const(&self, c: &BigInt, scalar: &BigInt) -> Result<BigInt> {
        self.check_ciphertext(c)?;
        mod_pow(c, scalar, &self.n_squared).ok_or_else(|| {
            Error::InvalidParameter("ciphertext is not invertible modulo n²".into())
        })
    }

    /// Multiplies in a fresh encryption of zero, leaving the plaintext
    /// untouched.
    pub fn rerandomize(
        &self,
        c: &BigInt,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<BigInt> {
        self.check_ciphertext(c)?;
        let r = random_coprime_below(&self.n, rng)?;
        Ok(c * r.modpow(&self.n, &self.n_squared) % &self.n_squared)
    }

    fn check_ciphertext(&self, c: &BigInt) -> Result<()> {
        if c.is_negative() || *c >= self.n_squared {
            return Err(Error::InvalidParameter(
                "ciphertext outside [0, n²)".into(),
            ));
        }
        Ok(())
    }

    /// Canonical encoding `{ n }`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_uint(&mut out, &self.n);
        out
    }
}

/// The public half of a `(k, l)`-threshold keyset: the Paillier key plus the
/// verification data every combiner needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdPublicKey {
    pub key: PublicKey,
    /// Total number of decryption servers.
    pub l: u32,
    /// Minimum number of cooperating servers.
    pub k: u32,
    /// Verification base, a random square modulo `n²`.
    pub v: BigInt,
    /// Per-server verification elements `v_i = v^{Δ·s_i} mod n²`.
    pub vi: Vec<BigInt>,
}

impl ThresholdPublicKey {
    /// `Δ = l!`.
    pub fn delta(&self) -> BigInt {
        factorial(self.l)
    }

    /// `(4Δ²)^{-1} mod n`, the constant applied after Lagrange combination.
    pub fn combine_shares_constant(&self) -> Result<BigInt> {
        let delta = self.delta();
        let four_delta_squared = BigInt::from(4) * &delta * &delta;
        mod_inv(&four_delta_squared, &self.key.n).ok_or(Error::InvalidPublicKey)
    }

    /// Recovers the plaintext from at least `k` partial decryptions.
    ///
    /// Every submitted share participates in the interpolation; the result
    /// does not depend on the order of the slice.
    pub fn combine_partial_decryptions(
        &self,
        shares: &[PartialDecryption],
    ) -> Result<BigInt> {
        self.check_share_set(shares)?;
        let delta = self.delta();
        let n_squared = self.key.n_squared();
        let two = BigInt::from(2);

        let mut c_prime = BigInt::one();
        for share in shares {
            let lambda = self.lagrange_coefficient(share.id, shares, &delta)?;
            let exponent = &two * lambda;
            let term = mod_pow(&share.value, &exponent, n_squared).ok_or_else(|| {
                Error::InvalidShareSet(format!(
                    "share {} is not invertible modulo n²",
                    share.id
                ))
            })?;
            c_prime = c_prime * term % n_squared;
        }

        let constant = self.combine_shares_constant()?;
        Ok(l_function(&c_prime, &self.key.n) * constant % &self.key.n)
    }

    /// Verifies every proof, then combines. The first failing proof aborts
    /// the combination and names the offending server.
    pub fn combine_partial_decryptions_zkp(
        &self,
        shares: &[PartialDecryptionZKP],
    ) -> Result<BigInt> {
        for share in shares {
            share.verify(self)?;
        }
        let plain: Vec<PartialDecryption> =
            shares.iter().map(|share| share.share.clone()).collect();
        self.combine_partial_decryptions(&plain)
    }

    /// Checks a completed decryption against a claimed plaintext: every proof
    /// must refer to `c` and verify, and the recombined value must equal
    /// `claimed`.
    pub fn verify_decryption(
        &self,
        c: &BigInt,
        claimed: &BigInt,
        shares: &[PartialDecryptionZKP],
    ) -> Result<()> {
        for share in shares {
            if share.c != *c {
                return Err(Error::InvalidProof { id: share.share.id });
            }
        }
        let recovered = self.combine_partial_decryptions_zkp(shares)?;
        if recovered != *claimed {
            return Err(Error::DecryptionMismatch);
        }
        Ok(())
    }

    /// `λ_i = Δ · Π_{j ≠ i} (-j) / (i - j)` as a single exact integer
    /// division. `Δ = l!` clears every denominator, so a nonzero remainder
    /// is an internal inconsistency and never silently rounded.
    fn lagrange_coefficient(
        &self,
        id: u32,
        shares: &[PartialDecryption],
        delta: &BigInt,
    ) -> Result<BigInt> {
        let mut numerator = delta.clone();
        let mut denominator = BigInt::one();
        for other in shares {
            if other.id == id {
                continue;
            }
            numerator *= -BigInt::from(other.id);
            denominator *= BigInt::from(i64::from(id) - i64::from(other.id));
        }
        let (quotient, remainder) = numerator.div_rem(&denominator);
        if !remainder.is_zero() {
            return Err(Error::InvalidShareSet(format!(
                "non-integral Lagrange coefficient for server {id}"
            )));
        }
        Ok(quotient)
    }

    fn check_share_set(&self, shares: &[PartialDecryption]) -> Result<()> {
        if (shares.len() as u64) < u64::from(self.k) {
            return Err(Error::InvalidShareSet(format!(
                "got {} shares, threshold is {}",
                shares.len(),
                self.k
            )));
        }
        let mut seen = HashSet::new();
        for share in shares {
            if share.id < 1 || share.id > self.l {
                return Err(Error::InvalidShareSet(format!(
                    "server id {} outside 1..={}",
                    share.id, self.l
                )));
            }
            if !seen.insert(share.id) {
                return Err(Error::InvalidShareSet(format!(
                    "duplicate server id {}",
                    share.id
                )));
            }
        }
        Ok(())
    }

    /// Canonical encoding `{ n, l, k, v, v_1..v_l }`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.key.to_bytes();
        put_u32(&mut out, self.l);
        put_u32(&mut out, self.k);
        put_uint(&mut out, &self.v);
        for vi in &self.vi {
            put_uint(&mut out, vi);
        }
        out
    }
}
