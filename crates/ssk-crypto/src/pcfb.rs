//! PCFB: full-block cipher feedback stream mode
//!
//! The feedback register starts as the IV. When every byte of it has been
//! consumed it is enciphered in place; each stream byte is XORed with the next
//! register byte, and the *ciphertext* byte is written back into the register.
//! Decryption therefore only needs the forward cipher.
//!
//! An instance carries mutable register state. Create one per message and
//! drop it afterwards.

use ssk_core::{SskError, SskResult};
use zeroize::Zeroize;

use crate::rijndael::BlockEncipher;

pub struct PcfbMode<C: BlockEncipher> {
    cipher: C,
    register: Vec<u8>,
    position: usize,
}

impl<C: BlockEncipher> PcfbMode<C> {
    /// Start a stream from `iv`, which must be exactly one cipher block long.
    pub fn new(cipher: C, iv: &[u8]) -> SskResult<Self> {
        let block_size = cipher.block_size();
        if iv.len() != block_size {
            return Err(SskError::format("PCFB IV", block_size, iv.len()));
        }
        Ok(Self {
            cipher,
            register: iv.to_vec(),
            position: block_size,
        })
    }

    /// Restart the stream from a new IV, keeping the cipher key.
    pub fn reset(&mut self, iv: &[u8]) -> SskResult<()> {
        if iv.len() != self.register.len() {
            return Err(SskError::format("PCFB IV", self.register.len(), iv.len()));
        }
        self.register.copy_from_slice(iv);
        self.position = self.register.len();
        Ok(())
    }

    fn refill_if_exhausted(&mut self) {
        if self.position == self.register.len() {
            self.cipher.encipher_block(&mut self.register);
            self.position = 0;
        }
    }

    /// Encrypt `data` in place.
    pub fn encipher(&mut self, data: &mut [u8]) {
        for b in data.iter_mut() {
            self.refill_if_exhausted();
            let c = self.register[self.position] ^ *b;
            self.register[self.position] = c;
            self.position += 1;
            *b = c;
        }
    }

    /// Decrypt `data` in place.
    pub fn decipher(&mut self, data: &mut [u8]) {
        for b in data.iter_mut() {
            self.refill_if_exhausted();
            let c = *b;
            *b = self.register[self.position] ^ c;
            self.register[self.position] = c;
            self.position += 1;
        }
    }
}

impl<C: BlockEncipher> Drop for PcfbMode<C> {
    fn drop(&mut self) {
        self.register.zeroize();
    }
}
