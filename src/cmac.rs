//! AES-CMAC / OMAC1. Subkey derivation by GF(2^128)
//! doubling, block-chained AES-CBC-MAC with a final-block padding rule.
//!
//! Grounded on the retrieval pack's `soft_aes::aes::aes_cmac` reference
//! implementation (subkey generation and final-block XOR discipline), wired
//! onto this crate's own [`Aes`] block primitive and [`gf128`] helpers
//! instead of its byte-at-a-time left-shift.

use crate::aes::Aes;
use crate::error::Result;
use crate::gf128;

/// Which subkey-derivation rule to use for `K2`. AES-SIV always uses
/// [`Variant::Omac1`]; [`Variant::Omac2`] exists because it is part of the
/// general `CMAC` subkey-derivation state, but nothing in S2V or SIV ever
/// selects it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Variant {
    /// `K2 = dbl(K1)`. This is plain CMAC / RFC 4493 AES-CMAC.
    #[default]
    Omac1,
    /// `K2 = inv(L)`.
    Omac2,
}

/// A keyed CMAC instance. Buffers input across any number of `update`
/// calls and produces a 16-byte tag on `finalize`, after which it is reset
/// and ready to MAC another message under the same key.
pub struct Cmac {
    cipher: Aes,
    k1: [u8; 16],
    k2: [u8; 16],
    /// Running CBC chaining value, covers every buffered block except the
    /// one withheld for the final-block rule.
    x: [u8; 16],
    buffer: Vec<u8>,
    variant: Variant,
}

impl Cmac {
    /// Build a CMAC (OMAC1) instance from an AES key (16/24/32 bytes).
    pub fn new(key: &[u8]) -> Result<Self> {
        Self::with_variant(key, Variant::Omac1)
    }

    /// Build a CMAC instance selecting the OMAC1 or OMAC2 subkey rule.
    pub fn with_variant(key: &[u8], variant: Variant) -> Result<Self> {
        let cipher = Aes::new(key)?;
        let l = cipher.encrypt_block(&gf128::ZERO);
        let k1 = gf128::dbl(l);
        let k2 = match variant {
            Variant::Omac1 => gf128::dbl(k1),
            Variant::Omac2 => gf128::inv(l),
        };

        Ok(Self {
            cipher,
            k1,
            k2,
            x: gf128::ZERO,
            buffer: Vec::new(),
            variant,
        })
    }

    /// Which subkey rule this instance uses.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Feed more message bytes in. Consumes every block beyond the last one,
    /// so that `finalize` always has between 0 and 16 bytes left to decide
    /// the final-block rule with.
    pub fn update(&mut self, msg: &[u8]) {
        self.buffer.extend_from_slice(msg);
        while self.buffer.len() > 16 {
            let block: [u8; 16] = self.buffer[..16].try_into().unwrap();
            self.buffer.drain(..16);
            self.x = self.cipher.encrypt_block(&gf128::xor(self.x, block));
        }
    }

    /// Absorb an optional final chunk, then produce the 16-byte tag. Resets
    /// the instance so it can immediately MAC another message.
    pub fn finalize(&mut self, msg: Option<&[u8]>) -> [u8; 16] {
        if let Some(m) = msg {
            self.update(m);
        }

        let last_block = if self.buffer.len() == 16 {
            gf128::xor(self.buffer[..16].try_into().unwrap(), self.k1)
        } else {
            let padded: [u8; 16] = gf128::pad10star(&self.buffer, 16).try_into().unwrap();
            gf128::xor(padded, self.k2)
        };

        let mac = self.cipher.encrypt_block(&gf128::xor(last_block, self.x));
        self.reset();
        mac
    }

    /// Reset to the initial state, discarding any buffered bytes.
    pub fn reset(&mut self) {
        self.x = gf128::ZERO;
        self.buffer.clear();
    }
}

/// One-shot convenience: `Cmac::new(key)?.finalize(Some(message))`.
pub fn cmac(key: &[u8], message: &[u8]) -> Result<[u8; 16]> {
    Ok(Cmac::new(key)?.finalize(Some(message)))
}
