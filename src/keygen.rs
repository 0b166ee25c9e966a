//! Trusted dealer for `(k, l)`-threshold Paillier keysets.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::arith::{factorial, gcd, generate_safe_prime, mod_inv, random_coprime_below};
use crate::error::{Error, Result};
use crate::polynomial::Polynomial;
use crate::pub_key::{PublicKey, ThresholdPublicKey};
use crate::threshold_share::ThresholdPrivateKey;

/// Minimum bit length of each safe-prime factor.
pub const MIN_FACTOR_BITS: usize = 6;

/// Resampling budget for the distinctness and coprimality constraints on the
/// factor pair.
const FACTOR_PAIR_ATTEMPTS: usize = 32;

/// Dealer parameters: `bits` per safe-prime factor, `l` servers, threshold
/// `k`.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdKeyGenerator {
    bits: usize,
    l: u32,
    k: u32,
}

impl ThresholdKeyGenerator {
    pub fn new(bits: usize, l: u32, k: u32) -> Result<Self> {
        if bits < MIN_FACTOR_BITS {
            return Err(Error::InvalidParameter(format!(
                "factor bit length {bits} below the minimum of {MIN_FACTOR_BITS}"
            )));
        }
        if l < 1 {
            return Err(Error::InvalidParameter(
                "need at least one decryption server".into(),
            ));
        }
        if k < 1 {
            return Err(Error::InvalidParameter(
                "threshold must be at least 1".into(),
            ));
        }
        if k > l {
            return Err(Error::InvalidParameter(format!(
                "threshold {k} exceeds the number of servers {l}"
            )));
        }
        Ok(ThresholdKeyGenerator { bits, l, k })
    }

    /// Runs the dealer: samples the modulus, splits the decryption exponent
    /// into `l` Shamir shares of threshold `k`, and publishes the
    /// verification data.
    pub fn generate(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<(ThresholdPublicKey, Vec<ThresholdPrivateKey>)> {
        let (mut p, mut q, mut p_half, mut q_half) = self.sample_factor_pair(rng)?;
        let n = &p * &q;
        let mut m = &p_half * &q_half;
        let mut nm = &n * &m;
        let n_squared = &n * &n;

        // The shared secret is β·m with β = m⁻¹ mod n: congruent to 1 mod n
        // (so L recovers the plaintext) and to 0 mod m (so the randomizer
        // component vanishes). The combiner's (4Δ²)⁻¹ constant assumes this
        // normalization.
        let mut beta = mod_inv(&m, &n).ok_or_else(|| {
            Error::KeyGenerationFailure("m is not invertible modulo n".into())
        })?;
        let secret = (&beta * &m).mod_floor(&nm);
        let polynomial = Polynomial::share(secret, self.k as usize - 1, &nm, rng)?;

        let v = random_coprime_below(&n_squared, rng)?.modpow(&BigInt::from(2), &n_squared);
        let delta = factorial(self.l);

        let mut vi = Vec::with_capacity(self.l as usize);
        let mut shares = Vec::with_capacity(self.l as usize);
        for id in 1..=self.l {
            let share = polynomial.evaluate(id, &nm);
            vi.push(v.modpow(&(&delta * &share), &n_squared));
            shares.push(share);
        }

        let public = ThresholdPublicKey {
            key: PublicKey::new(n),
            l: self.l,
            k: self.k,
            v,
            vi,
        };
        let private: Vec<ThresholdPrivateKey> = shares
            .into_iter()
            .zip(1u32..)
            .map(|(share, id)| ThresholdPrivateKey {
                key: public.clone(),
                id,
                share,
            })
            .collect();

        // The factorization data never leaves the dealer.
        for temporary in [
            &mut p,
            &mut q,
            &mut p_half,
            &mut q_half,
            &mut m,
            &mut nm,
            &mut beta,
        ] {
            *temporary = BigInt::zero();
        }

        Ok((public, private))
    }

    /// Two distinct safe primes of the requested size whose product is
    /// coprime to its totient.
    fn sample_factor_pair(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<(BigInt, BigInt, BigInt, BigInt)> {
        for _ in 0..FACTOR_PAIR_ATTEMPTS {
            let (p, p_half) = generate_safe_prime(self.bits, rng)?;
            let (q, q_half) = generate_safe_prime(self.bits, rng)?;
            if p == q {
                continue;
            }
            debug_assert_eq!(p.mod_floor(&BigInt::from(4)), BigInt::from(3));
            debug_assert_eq!(q.mod_floor(&BigInt::from(4)), BigInt::from(3));
            let n = &p * &q;
            let totient = (&p - BigInt::one()) * (&q - BigInt::one());
            if !gcd(&n, &totient).is_one() {
                continue;
            }
            return Ok((p, q, p_half, q_half));
        }
        Err(Error::KeyGenerationFailure(
            "could not find a usable pair of safe primes".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::OsRng;

    use super::*;

    #[test]
    fn parameter_validation() {
        assert!(matches!(
            ThresholdKeyGenerator::new(5, 3, 2),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            ThresholdKeyGenerator::new(32, 0, 0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            ThresholdKeyGenerator::new(32, 3, 0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            ThresholdKeyGenerator::new(32, 3, 4),
            Err(Error::InvalidParameter(_))
        ));
        assert!(ThresholdKeyGenerator::new(32, 3, 3).is_ok());
    }

    #[test]
    fn generated_keyset_is_well_formed() {
        let (public, servers) = ThresholdKeyGenerator::new(32, 5, 3)
            .unwrap()
            .generate(&mut OsRng)
            .unwrap();

        assert!(public.key.n.is_odd());
        assert!(gcd(&public.key.n, &BigInt::from(6)).is_one());
        assert!(public.key.n.bits() >= 63);
        assert_eq!(public.vi.len(), 5);

        assert_eq!(servers.len(), 5);
        for (index, server) in servers.iter().enumerate() {
            assert_eq!(server.id, index as u32 + 1);
            assert_eq!(server.key, public);
        }
    }

    #[test]
    fn verification_elements_match_the_shares() {
        let (public, servers) = ThresholdKeyGenerator::new(32, 4, 2)
            .unwrap()
            .generate(&mut OsRng)
            .unwrap();
        let delta = public.delta();
        for server in &servers {
            let expected = public
                .v
                .modpow(&(&delta * &server.share), public.key.n_squared());
            assert_eq!(public.vi[(server.id - 1) as usize], expected);
        }
    }

    #[test]
    fn one_of_one_keyset_round_trips() {
        let (public, servers) = ThresholdKeyGenerator::new(32, 1, 1)
            .unwrap()
            .generate(&mut OsRng)
            .unwrap();
        let c = public.key.encrypt(&BigInt::from(55), &mut OsRng).unwrap();
        let share = servers[0].decrypt(&c).unwrap();
        assert_eq!(
            public.combine_partial_decryptions(&[share]).unwrap(),
            BigInt::from(55)
        );
    }
}
