use super::constants::SBOX_INV;
use super::util::{add_round_key, dbl};

/// Core AES decryption function. Decrypts a 16-byte block using the given
/// round keys, in reverse order.
#[inline(always)]
pub fn decrypt_block(ciphertext: &[u8; 16], round_keys: &[[u8; 16]]) -> [u8; 16] {
    let mut state = *ciphertext;
    let num_rounds = round_keys.len();

    add_round_key(&mut state, &round_keys[num_rounds - 1]);

    for round_key in round_keys[1..num_rounds - 1].iter().rev() {
        shift_rows_inv(&mut state);
        sub_bytes_inv(&mut state);
        add_round_key(&mut state, round_key);
        mix_columns_inv(&mut state);
    }

    shift_rows_inv(&mut state);
    sub_bytes_inv(&mut state);
    add_round_key(&mut state, &round_keys[0]);

    state
}

/// Inverse SubBytes step. Each byte is substituted using the inverse SBOX.
#[inline(always)]
pub(crate) fn sub_bytes_inv(state: &mut [u8; 16]) {
    for byte in state {
        *byte = SBOX_INV[*byte as usize];
    }
}

/// Inverse ShiftRows step.
#[inline(always)]
fn shift_rows_inv(state: &mut [u8; 16]) {
    let s = *state;

    state[0] = s[0];
    state[4] = s[4];
    state[8] = s[8];
    state[12] = s[12];

    state[1] = s[13];
    state[5] = s[1];
    state[9] = s[5];
    state[13] = s[9];

    state[2] = s[10];
    state[6] = s[14];
    state[10] = s[2];
    state[14] = s[6];

    state[3] = s[7];
    state[7] = s[11];
    state[11] = s[15];
    state[15] = s[3];
}

/// Inverse MixColumns step.
/// ```text
/// [ b0 ]      [ 14  11  13  09 ]  [ d0 ]
/// | b1 |  =   | 09  14  11  13 |  | d1 |
/// | b2 |      | 13  09  14  11 |  | d2 |
/// [ b3 ]      [ 11  13  09  14 ]  [ d3 ]
/// ```
#[inline(always)]
fn mix_columns_inv(state: &mut [u8; 16]) {
    // optimisation technique from https://crypto.stackexchange.com/a/71206
    for col in 0..4 {
        let i = col * 4;
        let (a, b, c, d) = (state[i], state[i + 1], state[i + 2], state[i + 3]);
        let x = dbl(a ^ b ^ c ^ d); /* 2a + 2b + 2c + 2d */
        let y = dbl(x ^ a ^ c); /* 6a + 4b + 6c + 4d */
        let z = dbl(x ^ b ^ d); /* 4a + 6b + 4c + 6d */
        state[i] = dbl(y ^ a ^ b) ^ b ^ c ^ d; /* 14a + 11b + 13c + 09d */
        state[i + 1] = dbl(z ^ b ^ c) ^ c ^ d ^ a; /* 09a + 14b + 11c + 13d */
        state[i + 2] = dbl(y ^ c ^ d) ^ d ^ a ^ b; /* 13a + 09b + 14c + 11d */
        state[i + 3] = dbl(z ^ d ^ a) ^ a ^ b ^ c; /* 11a + 13b + 09c + 14d */
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aes::Aes;
    use crate::aes::encryption;

    #[test]
    fn shift_rows_inverts() {
        let mut actual: [u8; 16] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        let expected = actual;

        encryption::shift_rows(&mut actual);
        shift_rows_inv(&mut actual);

        assert_eq!(actual, expected);
    }

    #[test]
    fn sub_bytes_inverts() {
        let mut actual: [u8; 16] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        let expected = actual;

        encryption::sub_bytes(&mut actual);
        sub_bytes_inv(&mut actual);

        assert_eq!(actual, expected);
    }

    #[test]
    fn mix_columns_inverts() {
        let mut actual: [u8; 16] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        let expected = actual;

        encryption::mix_columns(&mut actual);
        mix_columns_inv(&mut actual);

        assert_eq!(actual, expected);
    }

    #[test]
    fn decrypt_reverses_encrypt_for_all_key_sizes() {
        for key_len in [16usize, 24, 32] {
            let key: Vec<u8> = (0u8..key_len as u8).collect();
            let cipher = Aes::new(&key).unwrap();

            let plaintext: [u8; 16] = [
                0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93,
                0x17, 0x2a,
            ];

            let encrypted = cipher.encrypt_block(&plaintext);
            let decrypted = cipher.decrypt_block(&encrypted);

            assert_eq!(decrypted, plaintext, "round trip failed for {key_len}-byte key");
        }
    }
}
