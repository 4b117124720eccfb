//! Routing location derivation
//!
//! A location is computable from public data: the public key hash and the
//! encrypted docname hash E(H(docname)). Holders of the crypto key can derive
//! E(H(docname)) themselves; everyone else reads it from the block header.

use sha2::{Digest, Sha256};
use ssk_core::Key;

use crate::rijndael::{BlockEncipher, Rijndael256};

/// E(H(docname)): SHA-256 of the UTF-8 docname, enciphered as one 256-bit
/// Rijndael block under `crypto_key`.
pub fn encrypt_docname(crypto_key: &Key, docname: &str) -> Key {
    let mut block: [u8; 32] = Sha256::digest(docname.as_bytes()).into();
    Rijndael256::new(crypto_key.as_bytes()).encipher_block(&mut block);
    Key::from_bytes(block)
}

/// `SHA256(encrypted_docname_hash ++ pubkey_hash)`.
pub fn location_from_ehdocname(pubkey_hash: &Key, encrypted_docname_hash: &Key) -> Key {
    let mut hasher = Sha256::new();
    hasher.update(encrypted_docname_hash.as_bytes());
    hasher.update(pubkey_hash.as_bytes());
    Key::from_bytes(hasher.finalize().into())
}

/// Location of the block published under `docname` by the holder of the key
/// hashing to `pubkey_hash`.
pub fn location(pubkey_hash: &Key, crypto_key: &Key, docname: &str) -> Key {
    location_from_ehdocname(pubkey_hash, &encrypt_docname(crypto_key, docname))
}
