//! ssk-crypto: verification and decryption of Signed Subspace Key blocks
//!
//! An SSK block is a 136-byte header plus a 1024-byte encrypted payload,
//! signed with DSA and addressed by a location derived from the signer's
//! public key hash and an encrypted document name.
//!
//! Pipeline:
//! ```text
//! raw bytes ─▶ SskHeader::parse ─▶ SskFound::new (DSA over SHA-256, 255-bit mask)
//!                                       │
//!          subspace key + cipher id ────┤
//!                                       ▼
//!        PCFB(key=subspace key, iv=E(H(docname)))  ─▶ payload key + length
//!        PCFB(key=payload key,  iv=payload key)    ─▶ plaintext
//! ```
//!
//! Location:
//! ```text
//! E(H(docname)) = Rijndael256(crypto_key, SHA256(docname))
//! location      = SHA256(E(H(docname)) ++ SHA256(pubkey))
//! ```

pub mod client;
pub mod dsa;
pub mod found;
pub mod header;
pub mod location;
pub mod mpi;
pub mod pcfb;
pub mod pubkey;
pub mod record;
pub mod rijndael;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::ClientSsk;
pub use dsa::{mask_digest, DsaSignature};
pub use found::{DecryptedSsk, SskFound};
pub use header::SskHeader;
pub use location::{encrypt_docname, location, location_from_ehdocname};
pub use pcfb::PcfbMode;
pub use pubkey::{DsaGroup, PubKey};
pub use rijndael::{BlockEncipher, Rijndael256};

pub use ssk_core::types::{
    CIPHER_AES_PCFB_256_SHA256, ENCRYPTED_HEADERS_SIZE, HASH_SHA256, KEY_SIZE, PUBKEY_SIZE,
    RECORD_SIZE, SSK_DATA_SIZE, SSK_HEADER_SIZE,
};
pub use ssk_core::{AlgorithmKind, Key, SskError, SskResult};
