//! Threshold Paillier cryptosystem.
//!
//! An additively homomorphic public-key scheme whose decryption key is split
//! among `l` servers so that any `k` of them can jointly decrypt while fewer
//! learn nothing. Each partial decryption can carry a Chaum-Pedersen proof
//! of correctness, so an untrusting combiner needs no interaction with the
//! servers.
//!
//! Based on:
//! [Damgård and Jurik, 2001](https://people.csail.mit.edu/rivest/voting/papers/DamgardJurikNielsen-AGeneralizationOfPailliersPublicKeySystemWithApplicationsToElectronicVoting.pdf)
//!
//! The engine is purely computational: it holds no mutable state, performs
//! no I/O, and every operation that needs entropy takes the caller's RNG.
//!
//! # Example
//! ```
//! use num_bigint::BigInt;
//! use rand::rngs::OsRng;
//! use tcpaillier::ThresholdKeyGenerator;
//!
//! # fn main() -> tcpaillier::Result<()> {
//! let (public, servers) = ThresholdKeyGenerator::new(32, 5, 3)?.generate(&mut OsRng)?;
//! let ciphertext = public.key.encrypt(&BigInt::from(42), &mut OsRng)?;
//! let shares = servers[..3]
//!     .iter()
//!     .map(|server| server.decrypt(&ciphertext))
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(
//!     public.combine_partial_decryptions(&shares)?,
//!     BigInt::from(42)
//! );
//! # Ok(())
//! # }
//! ```

pub mod arith;
pub mod decryption_share;
pub mod encoding;
mod error;
pub mod keygen;
pub mod polynomial;
pub mod priv_key;
pub mod pub_key;
pub mod threshold_share;
pub mod zk_proof;

pub use decryption_share::{PartialDecryption, PartialDecryptionZKP};
pub use error::{Error, Result};
pub use keygen::ThresholdKeyGenerator;
pub use priv_key::PrivateKey;
pub use pub_key::{l_function, PublicKey, ThresholdPublicKey};
pub use threshold_share::ThresholdPrivateKey;
