//! S2V, "string-to-vector". Collapses an ordered vector of
//! associated-data strings plus a plaintext into one 16-byte synthetic IV,
//! via a chain of CMACs combined with `dbl` and an XOR-end trick.

use crate::cmac::Cmac;
use crate::error::Result;
use crate::gf128;

const BLOCK_SIZE: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    AddingAd,
    StreamingPt,
    Done,
}

/// An S2V computation in progress. `update_aad` may only be called while in
/// the `AddingAd` phase; once `update` or `finalize` has seen any plaintext,
/// it transitions to `StreamingPt` and further `update_aad` calls are
/// silently ignored.
pub struct S2v {
    cmac_ad: Cmac,
    cmac_pt: Cmac,
    d: [u8; 16],
    /// True until the first `update_aad` call succeeds.
    empty: bool,
    buffer: Vec<u8>,
    phase: Phase,
}

impl S2v {
    /// Initialize S2V for a given key: `d = CMAC_K(0^128)`.
    pub fn new(key: &[u8]) -> Result<Self> {
        let mut cmac_ad = Cmac::new(key)?;
        let cmac_pt = Cmac::new(key)?;
        let d = cmac_ad.finalize(Some(&gf128::ZERO));

        Ok(Self {
            cmac_ad,
            cmac_pt,
            d,
            empty: true,
            buffer: Vec::new(),
            phase: Phase::AddingAd,
        })
    }

    /// Fold one associated-data string into the accumulator:
    /// `d = dbl(d) XOR CMAC_K(s)`. A no-op once plaintext streaming has
    /// started.
    pub fn update_aad(&mut self, s: &[u8]) {
        if self.phase != Phase::AddingAd {
            return;
        }
        let mac = self.cmac_ad.finalize(Some(s));
        self.d = gf128::xor(gf128::dbl(self.d), mac);
        self.empty = false;
    }

    /// Stream in a chunk of plaintext. Buffers internally, feeding any
    /// block beyond the last 16..31 bytes straight through to the running
    /// plaintext CMAC, so `finalize` only ever has to decide between a
    /// short tail and a single full-or-overhanging final block.
    pub fn update(&mut self, chunk: &[u8]) {
        self.phase = Phase::StreamingPt;
        self.buffer.extend_from_slice(chunk);
        while self.buffer.len() >= 2 * BLOCK_SIZE {
            let block: [u8; BLOCK_SIZE] = self.buffer[..BLOCK_SIZE].try_into().unwrap();
            self.buffer.drain(..BLOCK_SIZE);
            self.cmac_pt.update(&block);
        }
    }

    /// Absorb an optional final plaintext chunk and produce the 16-byte
    /// synthetic IV.
    pub fn finalize(&mut self, tail: Option<&[u8]>) -> [u8; 16] {
        if let Some(t) = tail {
            self.phase = Phase::StreamingPt;
            self.buffer.extend_from_slice(t);
        }
        self.phase = Phase::Done;

        let s_n = std::mem::take(&mut self.buffer);

        if self.empty && s_n.is_empty() {
            return self.cmac_ad.finalize(Some(&gf128::ONE));
        }

        if s_n.len() >= BLOCK_SIZE {
            let t = gf128::xorend(&s_n, self.d);
            self.cmac_pt.finalize(Some(&t))
        } else {
            let padded: [u8; BLOCK_SIZE] = gf128::pad10star(&s_n, BLOCK_SIZE).try_into().unwrap();
            let t = gf128::xor(gf128::dbl(self.d), padded);
            self.cmac_pt.finalize(Some(&t))
        }
    }

    /// Read-only accessor to the running AD accumulator, for tests that
    /// check intermediate values against RFC 5297 test vectors.
    pub fn running_d(&self) -> [u8; 16] {
        self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 5297 §A.1 key and AD.
    const KEY: [u8; 32] = [
        0xff, 0xfe, 0xfd, 0xfc, 0xfb, 0xfa, 0xf9, 0xf8, 0xf7, 0xf6, 0xf5, 0xf4, 0xf3, 0xf2, 0xf1,
        0xf0, 0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd,
        0xfe, 0xff,
    ];

    #[test]
    fn initial_d_matches_rfc_vector() {
        let s2v = S2v::new(&KEY).unwrap();
        assert_eq!(
            s2v.running_d(),
            [
                0x0e, 0x04, 0xdf, 0xaf, 0xc1, 0xef, 0xbf, 0x04, 0x01, 0x40, 0x58, 0x28, 0x59, 0xbf,
                0x07, 0x3a,
            ]
        );
    }

    #[test]
    fn d_after_first_ad_matches_rfc_vector() {
        #[rustfmt::skip]
        let ad: [u8; 25] = [
            0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
            0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27,
        ];
        let mut s2v = S2v::new(&KEY).unwrap();
        s2v.update_aad(&ad);
        assert_eq!(
            s2v.running_d(),
            [
                0xed, 0xf0, 0x9d, 0xe8, 0x76, 0xc6, 0x42, 0xee, 0x4d, 0x78, 0xbc, 0xe4, 0xce, 0xed,
                0xfc, 0x4f,
            ]
        );
    }

    #[test]
    fn final_tag_matches_rfc_vector() {
        #[rustfmt::skip]
        let ad: [u8; 25] = [
            0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
            0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27,
        ];
        let pt: [u8; 14] = [
            0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        ];

        let mut s2v = S2v::new(&KEY).unwrap();
        s2v.update_aad(&ad);
        let tag = s2v.finalize(Some(&pt));

        assert_eq!(
            tag,
            [
                0x85, 0x63, 0x2d, 0x07, 0xc6, 0xe8, 0xf3, 0x7f, 0x95, 0x0a, 0xcd, 0x32, 0x0a, 0x2e,
                0xcc, 0x93,
            ]
        );
    }

    #[test]
    fn ad_after_pt_is_ignored() {
        let mut s2v = S2v::new(&KEY).unwrap();
        s2v.update(b"some plaintext");
        let d_before = s2v.running_d();
        s2v.update_aad(b"too late");
        assert_eq!(s2v.running_d(), d_before);
    }

    #[test]
    fn empty_ad_and_empty_pt_uses_cmac_of_one_block() {
        let mut s2v = S2v::new(&KEY).unwrap();
        let tag = s2v.finalize(None);

        let expected = crate::cmac::cmac(&KEY, &gf128::ONE).unwrap();
        assert_eq!(tag, expected);
    }

    #[test]
    fn streamed_pt_matches_one_shot_finalize() {
        let long_pt: Vec<u8> = (0u8..200).cycle().take(200).collect();

        let mut streamed = S2v::new(&KEY).unwrap();
        streamed.update_aad(b"aad");
        streamed.update(&long_pt[..100]);
        streamed.update(&long_pt[100..150]);
        let streamed_tag = streamed.finalize(Some(&long_pt[150..]));

        let mut one_shot = S2v::new(&KEY).unwrap();
        one_shot.update_aad(b"aad");
        let one_shot_tag = one_shot.finalize(Some(&long_pt));

        assert_eq!(streamed_tag, one_shot_tag);
    }
}
