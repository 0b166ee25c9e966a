use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the threshold Paillier engine.
///
/// Nothing is retried internally except the bounded prime-sampling loops,
/// whose exhaustion reports as [`Error::KeyGenerationFailure`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("key generation failed: {0}")]
    KeyGenerationFailure(String),
    #[error("invalid share set: {0}")]
    InvalidShareSet(String),
    #[error("invalid partial decryption proof from server {id}")]
    InvalidProof { id: u32 },
    #[error("4 * delta^2 is not invertible modulo n")]
    InvalidPublicKey,
    #[error("key share is inconsistent with the published verification data")]
    InvalidKey,
    #[error("claimed plaintext disagrees with the recombined value")]
    DecryptionMismatch,
    #[error("randomness source failed: {0}")]
    RandomnessFailure(#[from] rand::Error),
}
