//! Counter mode. A 16-byte counter block is copied from the caller's IV;
//! each 16-byte chunk of input is XORed with `AES_K(counter)`, after which
//! the counter's last 32-bit word is incremented (wrapping modulo 2^32).
//! Encryption and decryption are the same operation.
//!
//! Runs serially below a size threshold and over `rayon` above it, since
//! each block's keystream is independent of every other block's.

use rayon::prelude::*;

use crate::aes::Aes;
use crate::error::{Error, Result};

/// Below this many bytes, CTR runs serially; above it, block keystreams are
/// computed in parallel (each block is independent of the others).
pub(crate) const PARALLEL_THRESHOLD: usize = 4 * 1024;

/// Increment the last 32-bit word of a 16-byte counter block, wrapping on
/// overflow.
fn increment(counter: &mut [u8; 16]) {
    let word = u32::from_be_bytes([counter[12], counter[13], counter[14], counter[15]]);
    let incremented = word.wrapping_add(1);
    counter[12..16].copy_from_slice(&incremented.to_be_bytes());
}

fn counter_at(iv: &[u8; 16], offset: u32) -> [u8; 16] {
    let mut counter = *iv;
    let word = u32::from_be_bytes([iv[12], iv[13], iv[14], iv[15]]);
    let bumped = word.wrapping_add(offset);
    counter[12..16].copy_from_slice(&bumped.to_be_bytes());
    counter
}

/// Run AES-CTR over `input` starting at counter block `iv`. Encryption and
/// decryption are identical: the keystream is XORed with the input either
/// way.
pub fn apply(cipher: &Aes, iv: &[u8; 16], input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let num_blocks = u32::try_from(input.len().div_ceil(16)).map_err(|_| Error::CounterOverflow)?;
    // fails if the last block's counter would wrap past u32::MAX
    u32::from_be_bytes([iv[12], iv[13], iv[14], iv[15]])
        .checked_add(num_blocks - 1)
        .ok_or(Error::CounterOverflow)?;

    let mut output = vec![0u8; input.len()];

    if input.len() > PARALLEL_THRESHOLD {
        output
            .par_chunks_mut(16)
            .zip(input.par_chunks(16))
            .enumerate()
            .for_each(|(i, (out_chunk, in_chunk))| {
                let block = counter_at(iv, i as u32);
                let keystream = cipher.encrypt_block(&block);
                for j in 0..in_chunk.len() {
                    out_chunk[j] = keystream[j] ^ in_chunk[j];
                }
            });
    } else {
        output
            .chunks_mut(16)
            .zip(input.chunks(16))
            .enumerate()
            .for_each(|(i, (out_chunk, in_chunk))| {
                let block = counter_at(iv, i as u32);
                let keystream = cipher.encrypt_block(&block);
                for j in 0..in_chunk.len() {
                    out_chunk[j] = keystream[j] ^ in_chunk[j];
                }
            });
    }

    Ok(output)
}
