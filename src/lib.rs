//! Deterministic, nonce-misuse-resistant authenticated encryption: AES-SIV
//! (RFC 5297) built on AES-128/192/256, AES-CTR, and AES-CMAC (OMAC1).
//!
//! The top-level type is [`Siv`], a two-operation AEAD:
//! - [`Siv::encrypt`] takes an ordered vector of associated-data strings and
//!   a plaintext, and returns `tag(16 bytes) || ciphertext`.
//! - [`Siv::decrypt`] reverses that, returning the plaintext only if the
//!   recomputed tag matches.
//!
//! Unlike GCM or CTR-with-random-nonce constructions, SIV does not need a
//! fresh nonce per message: the tag itself is a synthetic IV derived from
//! the message and AD, so encrypting the same inputs twice under the same
//! key always produces the same output, and a caller who accidentally
//! reuses a nonce (passed in as one of the AD strings) only loses the
//! guarantee that the *same* message was sent twice, not confidentiality of
//! distinct messages. The building blocks ([`aes`], [`cmac`], [`s2v`], and
//! [`ctr`]) are also exposed, since RFC 5297 conformance is easiest to test
//! one layer at a time.
//!
//! ## Examples
//! ```
//! use aes_siv::{Key, KeySize, Siv};
//!
//! let key = Key::generate(KeySize::Bits256).expect("random key generation failed");
//! let siv = Siv::new(&key).expect("key already validated by KeySize");
//!
//! let ad: &[u8] = b"message id: 42";
//! let plaintext = b"the treasure is buried under the old oak tree";
//!
//! let ciphertext = siv.encrypt(&[ad], plaintext).expect("encryption cannot fail");
//! let decrypted = siv.decrypt(&[ad], &ciphertext).expect("tag matches, ciphertext untampered");
//!
//! assert_eq!(decrypted, plaintext);
//! ```
//!
//! Decrypting under the wrong associated data, or after any bit of the
//! output has been flipped, fails closed:
//! ```
//! use aes_siv::{Error, Key, KeySize, Siv};
//!
//! let key = Key::generate(KeySize::Bits256).unwrap();
//! let siv = Siv::new(&key).unwrap();
//!
//! let mut ciphertext = siv.encrypt(&[b"v1"], b"hello").unwrap();
//! ciphertext[0] ^= 1;
//!
//! assert!(matches!(siv.decrypt(&[b"v1"], &ciphertext), Err(Error::AuthenticationFailed)));
//! ```

pub mod aes;
pub mod cmac;
pub mod ctr;
mod error;
pub(crate) mod gf128;
pub mod hex;
mod key;
pub mod s2v;
mod siv;

pub use error::{Error, Result};
pub use key::{Key, KeySize};
pub use siv::Siv;

pub use aes::Aes;
pub use cmac::Cmac;
pub use s2v::S2v;
