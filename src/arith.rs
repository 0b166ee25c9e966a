//! Big-integer arithmetic facade.
//!
//! Everything modular in the crate goes through these helpers, so the rest of
//! the code never has to care that primality testing and safe-prime sampling
//! run on GMP while the ring arithmetic stays on `num-bigint`.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed};
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Miller-Rabin rounds used for every primality check in the crate.
pub const PRIME_TEST_ROUNDS: u32 = 40;

/// Candidate primes tried per requested bit before safe-prime sampling
/// gives up.
const SAFE_PRIME_ATTEMPTS_PER_BIT: usize = 128;

pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    a.gcd(b)
}

pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    a.lcm(b)
}

/// Inverse of `a` modulo `modulus`, or `None` when `gcd(a, modulus) != 1`.
pub fn mod_inv(a: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    let extended = a.extended_gcd(modulus);
    if !extended.gcd.is_one() {
        return None;
    }
    Some(extended.x.mod_floor(modulus))
}

/// `base^exp mod modulus`. Negative exponents are realized by inverting the
/// base first, so they fail (`None`) exactly when the base is not a unit.
pub fn mod_pow(base: &BigInt, exp: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    if exp.is_negative() {
        let inverse = mod_inv(base, modulus)?;
        Some(inverse.modpow(&(-exp), modulus))
    } else {
        Some(base.modpow(exp, modulus))
    }
}

pub fn is_probable_prime(n: &BigInt, rounds: u32) -> bool {
    if n.sign() != Sign::Plus {
        return false;
    }
    to_gmp(n).is_probably_prime(rounds) != rug::integer::IsPrime::No
}

/// `Δ(x) = x!` computed exactly.
pub fn factorial(x: u32) -> BigInt {
    let mut acc = BigInt::one();
    for i in 2..=u64::from(x) {
        acc *= i;
    }
    acc
}

/// Uniform sample from `[0, bound)`.
pub fn random_below(bound: &BigInt, rng: &mut (impl CryptoRng + RngCore)) -> Result<BigInt> {
    if bound.sign() != Sign::Plus {
        return Err(Error::InvalidParameter(
            "sampling bound must be positive".into(),
        ));
    }
    let bits = bound.bits();
    let len = ((bits + 7) / 8) as usize;
    let excess = (len as u64 * 8 - bits) as u32;
    let mut buf = vec![0u8; len];
    loop {
        rng.try_fill_bytes(&mut buf)?;
        // Mask the spare high bits so at least half of all draws land
        // below the bound.
        buf[0] &= 0xff >> excess;
        let candidate = BigInt::from_bytes_be(Sign::Plus, &buf);
        if candidate < *bound {
            return Ok(candidate);
        }
    }
}

/// Uniform sample from the units of `Z_bound`.
pub fn random_coprime_below(
    bound: &BigInt,
    rng: &mut (impl CryptoRng + RngCore),
) -> Result<BigInt> {
    loop {
        let candidate = random_below(bound, rng)?;
        if gcd(&candidate, bound).is_one() {
            return Ok(candidate);
        }
    }
}

/// Samples a safe prime `p = 2p' + 1` with exactly `bits` bits, returning
/// `(p, p')`. The candidate loop is bounded; exhaustion is a
/// [`Error::KeyGenerationFailure`].
pub fn generate_safe_prime(
    bits: usize,
    rng: &mut (impl CryptoRng + RngCore),
) -> Result<(BigInt, BigInt)> {
    if bits < 3 {
        return Err(Error::InvalidParameter(
            "safe primes need at least 3 bits".into(),
        ));
    }
    let bits_u32 =
        u32::try_from(bits).map_err(|_| Error::InvalidParameter("bit length too large".into()))?;

    let mut seed = [0u8; 32];
    rng.try_fill_bytes(&mut seed)?;
    let mut state = rug::rand::RandState::new();
    state.seed(&rug::Integer::from_digits(&seed, rug::integer::Order::Msf));

    for _ in 0..bits.saturating_mul(SAFE_PRIME_ATTEMPTS_PER_BIT) {
        let mut candidate =
            rug::Integer::from(rug::Integer::random_bits(bits_u32 - 1, &mut state));
        candidate.set_bit(bits_u32 - 2, true);
        let half = candidate.next_prime();
        let p = rug::Integer::from(&half * 2u32) + 1u32;
        if p.significant_bits() != bits_u32 {
            continue;
        }
        if p.is_probably_prime(PRIME_TEST_ROUNDS) != rug::integer::IsPrime::No {
            return Ok((from_gmp(&p), from_gmp(&half)));
        }
    }
    Err(Error::KeyGenerationFailure(
        "safe prime sampling exhausted its retry budget".into(),
    ))
}

fn to_gmp(n: &BigInt) -> rug::Integer {
    rug::Integer::from_digits(&n.magnitude().to_bytes_be(), rug::integer::Order::Msf)
}

fn from_gmp(n: &rug::Integer) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &n.to_digits::<u8>(rug::integer::Order::Msf))
}
