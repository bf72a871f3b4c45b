//! Core AES block cipher: key schedule, and a 16-byte encrypt/decrypt
//! primitive. No mode of operation lives here; CTR (`crate::ctr`), CMAC
//! (`crate::cmac`) and S2V (`crate::s2v`) are all built on top of
//! [`Aes::encrypt_block`].

mod constants;
mod decryption;
mod encryption;
mod schedule;

pub use decryption::decrypt_block;
pub use encryption::encrypt_block;

use crate::error::{Error, Result};

/// A keyed AES instance: owns its expanded round-key schedule and exposes
/// the single-block encrypt/decrypt primitive. Immutable after
/// construction, reusable across any number of blocks.
#[derive(Clone)]
pub struct Aes {
    round_keys: Vec<[u8; 16]>,
}

impl Aes {
    /// Build an AES instance from a 16/24/32-byte key, expanding its round
    /// key schedule up front.
    pub fn new(key: &[u8]) -> Result<Self> {
        match key.len() {
            16 | 24 | 32 => Ok(Self {
                round_keys: schedule::expand_key(key),
            }),
            len => Err(Error::InvalidKeyLength {
                len,
                context: "AES key must be 16, 24, or 32 bytes",
            }),
        }
    }

    /// Block size in bytes. Always 16 for AES.
    pub const fn block_size(&self) -> usize {
        16
    }

    /// Encrypt a single 16-byte block.
    pub fn encrypt_block(&self, block: &[u8; 16]) -> [u8; 16] {
        encrypt_block(block, &self.round_keys)
    }

    /// Decrypt a single 16-byte block.
    pub fn decrypt_block(&self, block: &[u8; 16]) -> [u8; 16] {
        decrypt_block(block, &self.round_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_all_key_sizes() {
        let plaintext: [u8; 16] = *b"abcdefghijklmnop";
        for key_len in [16, 24, 32] {
            let key = vec![0x42u8; key_len];
            let cipher = Aes::new(&key).unwrap();
            let ct = cipher.encrypt_block(&plaintext);
            let pt = cipher.decrypt_block(&ct);
            assert_eq!(pt, plaintext);
        }
    }

    #[test]
    fn rejects_bad_key_length() {
        assert!(Aes::new(&[0u8; 20]).is_err());
    }
}
