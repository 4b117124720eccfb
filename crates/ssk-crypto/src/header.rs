//! Fixed 136-byte SSK header
//!
//! ```text
//! [0-1]     hash algorithm id (BE u16, 1 = SHA-256)
//! [2-3]     cipher id (BE u16)
//! [4-35]    E(H(docname)): encrypted docname hash
//! [36-71]   encrypted blob: payload key (32) + data length (2) + compression id (2)
//! [72-103]  DSA signature R
//! [104-135] DSA signature S
//! ```
//!
//! Bytes `[0-71]` are the signed portion.

use ssk_core::types::{ENCRYPTED_HEADERS_SIZE, KEY_SIZE, SSK_HEADER_SIZE};
use ssk_core::{Key, SskError, SskResult};

const HASH_ALG_OFFSET: usize = 0;
const CIPHER_ALG_OFFSET: usize = 2;
const EH_DOCNAME_OFFSET: usize = 4;
const ENCRYPTED_HEADERS_OFFSET: usize = EH_DOCNAME_OFFSET + KEY_SIZE;
/// Length of the signed prefix of the header.
pub const SIGNED_PORTION_SIZE: usize = ENCRYPTED_HEADERS_OFFSET + ENCRYPTED_HEADERS_SIZE;
const SIG_R_OFFSET: usize = SIGNED_PORTION_SIZE;
const SIG_S_OFFSET: usize = SIG_R_OFFSET + SIGNATURE_FIELD_SIZE;
/// Width of each of the R and S signature fields.
pub const SIGNATURE_FIELD_SIZE: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct SskHeader {
    bytes: [u8; SSK_HEADER_SIZE],
}

impl SskHeader {
    /// Wrap a raw header. Fails unless `bytes` is exactly 136 bytes long.
    pub fn parse(bytes: &[u8]) -> SskResult<Self> {
        let bytes: [u8; SSK_HEADER_SIZE] = bytes
            .try_into()
            .map_err(|_| SskError::format("SSK header", SSK_HEADER_SIZE, bytes.len()))?;
        Ok(Self { bytes })
    }

    /// Lay out a header from its fields.
    pub fn assemble(
        hash_algorithm: u16,
        cipher_algorithm: u16,
        encrypted_docname_hash: &Key,
        encrypted_headers: &[u8; ENCRYPTED_HEADERS_SIZE],
        sig_r: &[u8; SIGNATURE_FIELD_SIZE],
        sig_s: &[u8; SIGNATURE_FIELD_SIZE],
    ) -> Self {
        let mut bytes = [0u8; SSK_HEADER_SIZE];
        bytes[HASH_ALG_OFFSET..CIPHER_ALG_OFFSET].copy_from_slice(&hash_algorithm.to_be_bytes());
        bytes[CIPHER_ALG_OFFSET..EH_DOCNAME_OFFSET]
            .copy_from_slice(&cipher_algorithm.to_be_bytes());
        bytes[EH_DOCNAME_OFFSET..ENCRYPTED_HEADERS_OFFSET]
            .copy_from_slice(encrypted_docname_hash.as_bytes());
        bytes[ENCRYPTED_HEADERS_OFFSET..SIG_R_OFFSET].copy_from_slice(encrypted_headers);
        bytes[SIG_R_OFFSET..SIG_S_OFFSET].copy_from_slice(sig_r);
        bytes[SIG_S_OFFSET..].copy_from_slice(sig_s);
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; SSK_HEADER_SIZE] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    pub fn hash_algorithm(&self) -> u16 {
        u16::from_be_bytes([self.bytes[HASH_ALG_OFFSET], self.bytes[HASH_ALG_OFFSET + 1]])
    }

    pub fn cipher_algorithm(&self) -> u16 {
        u16::from_be_bytes([self.bytes[CIPHER_ALG_OFFSET], self.bytes[CIPHER_ALG_OFFSET + 1]])
    }

    /// The encrypted docname hash, E(H(docname)).
    pub fn encrypted_docname_hash(&self) -> Key {
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&self.bytes[EH_DOCNAME_OFFSET..ENCRYPTED_HEADERS_OFFSET]);
        Key::from_bytes(key)
    }

    pub fn encrypted_headers(&self) -> &[u8] {
        &self.bytes[ENCRYPTED_HEADERS_OFFSET..SIG_R_OFFSET]
    }

    /// The portion covered by the signature (everything before R).
    pub fn signed_portion(&self) -> &[u8] {
        &self.bytes[..SIGNED_PORTION_SIZE]
    }

    pub fn signature_r(&self) -> &[u8] {
        &self.bytes[SIG_R_OFFSET..SIG_S_OFFSET]
    }

    pub fn signature_s(&self) -> &[u8] {
        &self.bytes[SIG_S_OFFSET..]
    }
}

impl std::fmt::Debug for SskHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SskHeader")
            .field("hash_algorithm", &self.hash_algorithm())
            .field("cipher_algorithm", &self.cipher_algorithm())
            .field("encrypted_docname_hash", &self.encrypted_docname_hash())
            .finish_non_exhaustive()
    }
}
