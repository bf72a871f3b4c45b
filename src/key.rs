//! Defines the [`Key`] struct: a valid AES-SIV key (32, 48, or 64 bytes,
//! giving AES-SIV-256/384/512 respectively). Keys can be randomly generated
//! or built from an existing byte slice.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::error::{Error, Result};

/// Which AES-SIV variant to generate a random key for. Names the total SIV
/// key size; each half is an AES key of half that size (so `Bits256` gives
/// two AES-128 keys, `Bits512` gives two AES-256 keys).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeySize {
    /// 32-byte SIV key: AES-128 for S2V, AES-128 for CTR.
    Bits256,
    /// 48-byte SIV key: AES-192 for S2V, AES-192 for CTR.
    Bits384,
    /// 64-byte SIV key: AES-256 for S2V, AES-256 for CTR.
    Bits512,
}

impl KeySize {
    fn byte_len(self) -> usize {
        match self {
            KeySize::Bits256 => 32,
            KeySize::Bits384 => 48,
            KeySize::Bits512 => 64,
        }
    }
}

/// A valid AES-SIV key: 32, 48, or 64 bytes. Required to construct a
/// [`Siv`](crate::Siv) instance.
///
/// ## Examples
/// ```
/// use aes_siv::{Key, KeySize};
///
/// let key = Key::generate(KeySize::Bits256).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
///
/// let (s2v_half, ctr_half) = key.split();
/// assert_eq!(s2v_half.len(), 16);
/// assert_eq!(ctr_half.len(), 16);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Key {
    bytes: Vec<u8>,
}

impl Key {
    /// Generate a random key of the given size. Returns an error if the OS
    /// RNG fails.
    pub fn generate(size: KeySize) -> Result<Self> {
        let mut bytes = vec![0u8; size.byte_len()];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(Self { bytes })
    }

    /// Build a key from a slice of bytes. Returns
    /// [`InvalidKeyLength`](Error::InvalidKeyLength) unless the slice is 32,
    /// 48, or 64 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            32 | 48 | 64 => Ok(Self {
                bytes: bytes.to_vec(),
            }),
            len => Err(Error::InvalidKeyLength {
                len,
                context: "SIV key must be 32, 48, or 64 bytes",
            }),
        }
    }

    /// The key's raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Split into the two equal-length AES keys SIV drives internally: the
    /// S2V (MAC) key, then the CTR (encryption) key. Split by byte count,
    /// not bit count.
    pub fn split(&self) -> (&[u8], &[u8]) {
        let half = self.bytes.len() / 2;
        self.bytes.split_at(half)
    }
}
