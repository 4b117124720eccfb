//! Client-side SSK key bundle
//!
//! The decoded parts of an SSK URI: whose subspace (public key hash), which
//! document, and the symmetric key that opens it. Parsing the URI text is left
//! to the caller.

use ssk_core::types::CIPHER_AES_PCFB_256_SHA256;
use ssk_core::{AlgorithmKind, Key, SskError, SskResult};

use crate::found::{DecryptedSsk, SskFound};
use crate::location::{encrypt_docname, location_from_ehdocname};

#[derive(Clone, PartialEq, Eq)]
pub struct ClientSsk {
    pubkey_hash: Key,
    crypto_key: Key,
    docname: String,
    crypto_algorithm: u16,
    encrypted_docname_hash: Key,
}

impl ClientSsk {
    pub fn new(
        pubkey_hash: Key,
        crypto_key: Key,
        docname: impl Into<String>,
        crypto_algorithm: u16,
    ) -> SskResult<Self> {
        if crypto_algorithm != CIPHER_AES_PCFB_256_SHA256 {
            return Err(SskError::UnsupportedAlgorithm {
                kind: AlgorithmKind::Cipher,
                id: crypto_algorithm,
            });
        }
        let docname = docname.into();
        let encrypted_docname_hash = encrypt_docname(&crypto_key, &docname);
        Ok(Self {
            pubkey_hash,
            crypto_key,
            docname,
            crypto_algorithm,
            encrypted_docname_hash,
        })
    }

    pub fn pubkey_hash(&self) -> Key {
        self.pubkey_hash
    }

    pub fn docname(&self) -> &str {
        &self.docname
    }

    pub fn crypto_algorithm(&self) -> u16 {
        self.crypto_algorithm
    }

    pub fn encrypted_docname_hash(&self) -> Key {
        self.encrypted_docname_hash
    }

    /// Routing location of the block this key opens.
    pub fn location(&self) -> Key {
        location_from_ehdocname(&self.pubkey_hash, &self.encrypted_docname_hash)
    }

    /// Decrypt `found` after checking it belongs to this key.
    pub fn decode(&self, found: &SskFound) -> SskResult<DecryptedSsk> {
        if found.pubkey().hash() != self.pubkey_hash {
            return Err(SskError::KeyMismatch("public key hash does not match"));
        }
        if found.header().encrypted_docname_hash() != self.encrypted_docname_hash {
            return Err(SskError::KeyMismatch("encrypted docname hash does not match"));
        }
        found.decrypt_block(&self.crypto_key, self.crypto_algorithm)
    }
}

impl std::fmt::Debug for ClientSsk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSsk")
            .field("pubkey_hash", &self.pubkey_hash)
            .field("crypto_key", &"[REDACTED]")
            .field("docname", &self.docname)
            .field("crypto_algorithm", &self.crypto_algorithm)
            .finish()
    }
}
