//! SIV, the public AEAD. Splits the key, drives S2V over
//! the AD vector and plaintext to get a synthetic IV, masks it into a CTR
//! starting counter, and concatenates `tag || ciphertext`. Decrypt reverses
//! the same steps and authenticates by recomputing S2V over the candidate
//! plaintext.

use crate::aes::Aes;
use crate::ctr;
use crate::error::{Error, Result};
use crate::gf128;
use crate::key::Key;
use crate::s2v::S2v;

/// A keyed AES-SIV instance. Deterministic and nonce-misuse-resistant:
/// encrypting the same `(associated_data, plaintext)` pair twice under the
/// same key always produces the same output, and accidentally reusing a
/// nonce (passed as one of the AD strings) degrades gracefully rather than
/// breaking confidentiality outright.
pub struct Siv {
    s2v_key: Vec<u8>,
    ctr_cipher: Aes,
}

impl Siv {
    /// Build a SIV instance from a [`Key`] (32, 48, or 64 bytes), splitting
    /// it into the S2V and CTR sub-keys.
    pub fn new(key: &Key) -> Result<Self> {
        let (s2v_key, ctr_key) = key.split();
        Ok(Self {
            s2v_key: s2v_key.to_vec(),
            ctr_cipher: Aes::new(ctr_key)?,
        })
    }

    /// Build directly from raw key bytes (32, 48, or 64 bytes), without
    /// constructing a [`Key`] first.
    pub fn from_bytes(key: &[u8]) -> Result<Self> {
        Self::new(&Key::try_from_slice(key)?)
    }

    /// Encrypt `plaintext`, authenticating it together with every string in
    /// `ad` (in order; AES-SIV is sensitive to AD order, unlike a set).
    /// Returns `tag(16 bytes) || ciphertext(|plaintext| bytes)`.
    pub fn encrypt(&self, ad: &[&[u8]], plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut s2v = S2v::new(&self.s2v_key)?;
        for a in ad {
            s2v.update_aad(a);
        }
        let tag = s2v.finalize(Some(plaintext));

        let iv = gf128::and(tag, gf128::NON_MSB);
        let ciphertext = ctr::apply(&self.ctr_cipher, &iv, plaintext)?;

        let mut out = Vec::with_capacity(16 + ciphertext.len());
        out.extend_from_slice(&tag);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypt `input` (`tag || ciphertext`), verifying it was produced by
    /// `encrypt` for this key and the same `ad` vector.
    ///
    /// On tag mismatch, returns [`AuthenticationFailed`](Error::AuthenticationFailed)
    /// and never returns the candidate plaintext: it is zeroed before the
    /// function returns, and the comparison that decides the outcome is a
    /// word-wise XOR-OR accumulation rather than a short-circuiting
    /// byte compare, so timing does not leak which byte first differed.
    pub fn decrypt(&self, ad: &[&[u8]], input: &[u8]) -> Result<Vec<u8>> {
        if input.len() < 16 {
            return Err(Error::InputTooShort { len: input.len() });
        }
        let (tag_bytes, ciphertext) = input.split_at(16);
        let tag: [u8; 16] = tag_bytes.try_into().unwrap();

        let iv = gf128::and(tag, gf128::NON_MSB);
        let mut plaintext = ctr::apply(&self.ctr_cipher, &iv, ciphertext)?;

        let mut s2v = S2v::new(&self.s2v_key)?;
        for a in ad {
            s2v.update_aad(a);
        }
        let recomputed = s2v.finalize(Some(&plaintext));

        if constant_time_eq(&tag, &recomputed) {
            Ok(plaintext)
        } else {
            plaintext.iter_mut().for_each(|b| *b = 0);
            Err(Error::AuthenticationFailed)
        }
    }
}

fn constant_time_eq(a: &[u8; 16], b: &[u8; 16]) -> bool {
    let mut diff = 0u8;
    for i in 0..16 {
        diff |= a[i] ^ b[i];
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_with_associated_data() {
        let key = Key::try_from_slice(&[0x11u8; 32]).unwrap();
        let siv = Siv::new(&key).unwrap();

        let ad: &[u8] = b"header";
        let plaintext = b"synthetic initialization vectors are neat";

        let ciphertext = siv.encrypt(&[ad], plaintext).unwrap();
        assert_eq!(ciphertext.len(), 16 + plaintext.len());

        let decrypted = siv.decrypt(&[ad], &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn encryption_is_deterministic() {
        let key = Key::try_from_slice(&[0x22u8; 48]).unwrap();
        let siv = Siv::new(&key).unwrap();

        let first = siv.encrypt(&[b"ad"], b"message").unwrap();
        let second = siv.encrypt(&[b"ad"], b"message").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bit_flip_causes_authentication_failure() {
        let key = Key::try_from_slice(&[0x33u8; 32]).unwrap();
        let siv = Siv::new(&key).unwrap();

        let mut ciphertext = siv.encrypt(&[], b"hello world").unwrap();
        ciphertext[0] ^= 0x01;

        let err = siv.decrypt(&[], &ciphertext).unwrap_err();
        assert!(matches!(err, Error::AuthenticationFailed));
    }

    #[test]
    fn rejects_input_shorter_than_tag() {
        let key = Key::try_from_slice(&[0x44u8; 32]).unwrap();
        let siv = Siv::new(&key).unwrap();
        let err = siv.decrypt(&[], &[0u8; 8]).unwrap_err();
        assert!(matches!(err, Error::InputTooShort { len: 8 }));
    }

    #[test]
    fn empty_ad_empty_plaintext_is_a_bare_tag() {
        let key = Key::try_from_slice(&[0x55u8; 32]).unwrap();
        let siv = Siv::new(&key).unwrap();

        let out = siv.encrypt(&[], &[]).unwrap();
        assert_eq!(out.len(), 16);

        let decrypted = siv.decrypt(&[], &out).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn ad_order_matters() {
        let key = Key::try_from_slice(&[0x66u8; 32]).unwrap();
        let siv = Siv::new(&key).unwrap();

        let a: &[u8] = b"first";
        let b: &[u8] = b"second";

        let forward = siv.encrypt(&[a, b], b"payload").unwrap();
        let reversed = siv.encrypt(&[b, a], b"payload").unwrap();
        assert_ne!(forward, reversed);
    }
}
