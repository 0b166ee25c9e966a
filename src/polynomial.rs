//! Shamir polynomial used by the dealer to split the decryption exponent.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::arith::random_below;
use crate::error::Result;

/// A polynomial over `Z_nm` with a prescribed constant term. Every
/// coefficient except the constant is secret-shared entropy, so the whole
/// vector is wiped on drop.
pub struct Polynomial {
    coefficients: Vec<BigInt>,
}

impl Polynomial {
    /// Builds `f(X) = a_0 + a_1 X + ... + a_degree X^degree` with
    /// `a_0 = constant mod modulus` and the remaining coefficients uniform in
    /// `[0, modulus)`.
    pub fn share(
        constant: BigInt,
        degree: usize,
        modulus: &BigInt,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<Self> {
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(constant.mod_floor(modulus));
        for _ in 0..degree {
            coefficients.push(random_below(modulus, rng)?);
        }
        Ok(Polynomial { coefficients })
    }

    /// `f(x) mod modulus` by Horner's rule, reducing at every step.
    pub fn evaluate(&self, x: u32, modulus: &BigInt) -> BigInt {
        let x = BigInt::from(x);
        let mut acc = BigInt::zero();
        for coefficient in self.coefficients.iter().rev() {
            acc = (acc * &x + coefficient).mod_floor(modulus);
        }
        acc
    }
}

impl Zeroize for Polynomial {
    fn zeroize(&mut self) {
        for coefficient in &mut self.coefficients {
            *coefficient = BigInt::zero();
        }
    }
}

impl Drop for Polynomial {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use num_traits::One;
    use rand::rngs::OsRng;

    use super::*;

    #[test]
    fn constant_term_is_the_shared_secret() {
        let modulus = BigInt::from(9973);
        let secret = BigInt::from(1234);
        let poly = Polynomial::share(secret.clone(), 4, &modulus, &mut OsRng).unwrap();
        assert_eq!(poly.evaluate(0, &modulus), secret);
    }

    #[test]
    fn constant_term_is_reduced() {
        let modulus = BigInt::from(100);
        let poly = Polynomial::share(BigInt::from(1234), 0, &modulus, &mut OsRng).unwrap();
        assert_eq!(poly.evaluate(0, &modulus), BigInt::from(34));
    }

    #[test]
    fn evaluation_matches_the_power_sum() {
        let modulus = BigInt::from(7919);
        let poly = Polynomial {
            coefficients: vec![BigInt::from(5), BigInt::from(3), BigInt::from(2)],
        };
        // 5 + 3*11 + 2*121 = 280
        assert_eq!(poly.evaluate(11, &modulus), BigInt::from(280));
    }

    #[test]
    fn degree_zero_polynomial_is_constant() {
        let modulus = BigInt::from(7919);
        let poly = Polynomial::share(BigInt::one(), 0, &modulus, &mut OsRng).unwrap();
        assert_eq!(poly.evaluate(1, &modulus), poly.evaluate(77, &modulus));
    }

    #[test]
    fn zeroize_wipes_all_coefficients() {
        let modulus = BigInt::from(9973);
        let mut poly = Polynomial::share(BigInt::from(42), 3, &modulus, &mut OsRng).unwrap();
        poly.zeroize();
        for coefficient in &poly.coefficients {
            assert!(coefficient.is_zero());
        }
    }
}
