use thiserror::Error;
use rand::rand_core;

/// AES-SIV result type.
pub type Result<T> = std::result::Result<T, Error>;

/// AES-SIV error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Key did not match any valid length for the context it was used in
    /// (16/24/32 bytes for a raw AES key, 32/48/64 bytes for a SIV key).
    #[error("invalid key length: {len} bytes ({context})")]
    InvalidKeyLength { len: usize, context: &'static str },

    /// `Siv::decrypt` input was shorter than the 16-byte tag it must contain.
    #[error("input too short to contain a tag: {len} bytes (need at least 16)")]
    InputTooShort { len: usize },

    /// Recomputed synthetic IV did not match the tag carried in the input.
    /// Carries no further detail by design: callers must not be able to
    /// branch on *how* authentication failed.
    #[error("SIV authentication failed (invalid tag)")]
    AuthenticationFailed,

    /// Attempted to encrypt or decrypt more than 2^32 16-byte blocks under
    /// a single counter.
    #[error("input size caused CTR counter overflow (maximum is 16 * 2^32 bytes)")]
    CounterOverflow,

    /// Malformed input at the hex codec boundary.
    #[error("malformed hex: {0}")]
    MalformedHex(#[from] hex::FromHexError),

    /// OS RNG failed during random key generation.
    #[error("OS RNG failed in random key generation")]
    Rng(#[from] rand_core::OsError),
}
