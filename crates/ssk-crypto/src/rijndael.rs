//! Rijndael block cipher, encipher direction only
//!
//! SSK uses Rijndael with a 256-bit key *and* a 256-bit block, which is not
//! AES (AES fixes the block at 128 bits). Both PCFB directions and the docname
//! encryption only ever run the forward cipher, so no inverse is provided.
//!
//! The implementation is generic over the block width in 32-bit columns:
//! `Rijndael<8>` is the 256-bit-block cipher SSK needs, `Rijndael<4>` is
//! AES-256 and is what the known-answer test checks against.

use zeroize::Zeroize;

/// A block cipher that can encipher one block in place.
pub trait BlockEncipher {
    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Encipher `block` in place. `block.len()` must equal [`Self::block_size`].
    fn encipher_block(&self, block: &mut [u8]);
}

/// Key length in 32-bit words (256-bit keys only).
const NK: usize = 8;

#[rustfmt::skip]
const SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

/// Rijndael with a 256-bit key and a 256-bit block.
pub type Rijndael256 = Rijndael<8>;

/// Rijndael with a 256-bit key and an `NB * 32`-bit block.
#[derive(Clone)]
pub struct Rijndael<const NB: usize> {
    /// Expanded key, `NB * (rounds + 1)` words.
    round_keys: Vec<[u8; 4]>,
    rounds: usize,
}

impl<const NB: usize> Rijndael<NB> {
    pub const BLOCK_SIZE: usize = NB * 4;

    /// ShiftRows offsets for rows 1..=3.
    const SHIFTS: [usize; 3] = if NB == 8 { [1, 3, 4] } else { [1, 2, 3] };

    pub fn new(key: &[u8; 32]) -> Self {
        assert!(NB == 4 || NB == 6 || NB == 8, "Rijndael block must be 128, 192 or 256 bits");
        let rounds = NK.max(NB) + 6;
        let total = NB * (rounds + 1);

        let mut w: Vec<[u8; 4]> = Vec::with_capacity(total);
        for chunk in key.chunks_exact(4) {
            w.push([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let mut rcon = 1u8;
        for i in NK..total {
            let mut t = w[i - 1];
            if i % NK == 0 {
                t.rotate_left(1);
                sub_word(&mut t);
                t[0] ^= rcon;
                rcon = xtime(rcon);
            } else if i % NK == 4 {
                sub_word(&mut t);
            }
            let prev = w[i - NK];
            w.push([prev[0] ^ t[0], prev[1] ^ t[1], prev[2] ^ t[2], prev[3] ^ t[3]]);
        }

        Self {
            round_keys: w,
            rounds,
        }
    }

    fn add_round_key(&self, state: &mut [u8], round: usize) {
        for (col, word) in state
            .chunks_exact_mut(4)
            .zip(&self.round_keys[round * NB..(round + 1) * NB])
        {
            for (b, k) in col.iter_mut().zip(word) {
                *b ^= k;
            }
        }
    }

    fn encipher(&self, block: &mut [u8]) {
        assert_eq!(block.len(), Self::BLOCK_SIZE, "Rijndael block size mismatch");
        // State is column-major: byte (row r, column c) lives at 4 * c + r
        self.add_round_key(block, 0);
        for round in 1..=self.rounds {
            for b in block.iter_mut() {
                *b = SBOX[usize::from(*b)];
            }
            shift_rows::<NB>(block, &Self::SHIFTS);
            if round != self.rounds {
                for col in block.chunks_exact_mut(4) {
                    mix_column(col);
                }
            }
            self.add_round_key(block, round);
        }
    }
}

impl<const NB: usize> BlockEncipher for Rijndael<NB> {
    fn block_size(&self) -> usize {
        Self::BLOCK_SIZE
    }

    fn encipher_block(&self, block: &mut [u8]) {
        self.encipher(block);
    }
}

impl<const NB: usize> Drop for Rijndael<NB> {
    fn drop(&mut self) {
        for word in &mut self.round_keys {
            word.zeroize();
        }
    }
}

impl<const NB: usize> std::fmt::Debug for Rijndael<NB> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rijndael")
            .field("block_bits", &(NB * 32))
            .field("round_keys", &"[REDACTED]")
            .finish()
    }
}

fn xtime(b: u8) -> u8 {
    (b << 1) ^ if b & 0x80 != 0 { 0x1b } else { 0 }
}

fn sub_word(word: &mut [u8; 4]) {
    for b in word.iter_mut() {
        *b = SBOX[usize::from(*b)];
    }
}

fn shift_rows<const NB: usize>(state: &mut [u8], shifts: &[usize; 3]) {
    let mut row = [0u8; 8];
    for (r, &shift) in (1..4).zip(shifts) {
        for c in 0..NB {
            row[c] = state[4 * ((c + shift) % NB) + r];
        }
        for c in 0..NB {
            state[4 * c + r] = row[c];
        }
    }
}

fn mix_column(col: &mut [u8]) {
    let a = [col[0], col[1], col[2], col[3]];
    let all = a[0] ^ a[1] ^ a[2] ^ a[3];
    // 2a ^ 3b ^ c ^ d == a ^ all ^ xtime(a ^ b)
    col[0] = a[0] ^ all ^ xtime(a[0] ^ a[1]);
    col[1] = a[1] ^ all ^ xtime(a[1] ^ a[2]);
    col[2] = a[2] ^ all ^ xtime(a[2] ^ a[3]);
    col[3] = a[3] ^ all ^ xtime(a[3] ^ a[0]);
}
