//! Verified SSK blocks and their decryption
//!
//! [`SskFound`] is the only way to hold an SSK block, and [`SskFound::new`]
//! refuses to build one whose signature does not check out. Decryption runs
//! two independent PCFB passes:
//! ```text
//! blob (36)     = PCFB(key = subspace key, iv = E(H(docname)))⁻¹
//!               → payload key (32) || length (2, top bit = metadata) || compression (2)
//! payload (1024) = PCFB(key = payload key, iv = payload key)⁻¹
//! ```

use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use ssk_core::types::{
    CIPHER_AES_PCFB_256_SHA256, DATA_DECRYPT_KEY_SIZE, ENCRYPTED_HEADERS_SIZE, HASH_SHA256,
    SSK_DATA_SIZE,
};
use ssk_core::{AlgorithmKind, Key, SskError, SskResult};
use zeroize::{Zeroize, Zeroizing};

use crate::dsa::{self, DsaSignature};
use crate::header::SskHeader;
use crate::location::location_from_ehdocname;
use crate::pcfb::PcfbMode;
use crate::pubkey::PubKey;
use crate::rijndael::Rijndael256;

/// Top bit of the length field: the payload is metadata rather than content.
const METADATA_FLAG: u16 = 0x8000;

/// A signature-checked SSK block.
#[derive(Clone, PartialEq, Eq)]
pub struct SskFound {
    location: Key,
    pubkey: PubKey,
    header: SskHeader,
    data: Box<[u8; SSK_DATA_SIZE]>,
}

/// Plaintext of a decrypted block plus the flags carried next to its length.
#[derive(Clone, PartialEq, Eq)]
pub struct DecryptedSsk {
    pub data: Vec<u8>,
    pub is_metadata: bool,
    /// Compression codec id; -1 means uncompressed.
    pub compression_algorithm: i16,
}

impl std::fmt::Debug for DecryptedSsk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptedSsk")
            .field("len", &self.data.len())
            .field("is_metadata", &self.is_metadata)
            .field("compression_algorithm", &self.compression_algorithm)
            .finish()
    }
}

impl SskFound {
    /// Validate a candidate block and wrap it.
    ///
    /// The signature covers `SHA256(header[0..72] ++ SHA256(data))`, masked to
    /// 255 bits. `location` is stored as given; see [`Self::verify_location`].
    pub fn new(location: Key, header: SskHeader, data: &[u8], pubkey: PubKey) -> SskResult<Self> {
        let data: [u8; SSK_DATA_SIZE] = data
            .try_into()
            .map_err(|_| SskError::format("SSK data", SSK_DATA_SIZE, data.len()))?;

        let hash_algorithm = header.hash_algorithm();
        if hash_algorithm != HASH_SHA256 {
            tracing::trace!(%location, hash_algorithm, "rejecting SSK: unsupported hash");
            return Err(SskError::UnsupportedAlgorithm {
                kind: AlgorithmKind::Hash,
                id: hash_algorithm,
            });
        }

        let data_hash = Sha256::digest(data);
        let mut hasher = Sha256::new();
        hasher.update(header.signed_portion());
        hasher.update(data_hash);
        let overall_hash = hasher.finalize();

        let m = BigUint::from_bytes_be(&dsa::mask_digest(&overall_hash));
        let signature = DsaSignature::from_bytes(header.signature_r(), header.signature_s());
        if !dsa::verify(&pubkey, &signature, &m) {
            tracing::trace!(%location, pubkey = %pubkey.hash(), "rejecting SSK: bad signature");
            return Err(SskError::SignatureInvalid);
        }

        tracing::trace!(%location, "SSK signature verified");
        Ok(Self {
            location,
            pubkey,
            header,
            data: Box::new(data),
        })
    }

    pub fn location(&self) -> Key {
        self.location
    }

    pub fn pubkey(&self) -> &PubKey {
        &self.pubkey
    }

    pub fn header(&self) -> &SskHeader {
        &self.header
    }

    /// The still-encrypted payload.
    pub fn data(&self) -> &[u8; SSK_DATA_SIZE] {
        &self.data
    }

    /// Check that the stored location is the one the public key and the
    /// header's encrypted docname hash route to.
    pub fn verify_location(&self) -> SskResult<()> {
        let expected =
            location_from_ehdocname(&self.pubkey.hash(), &self.header.encrypted_docname_hash());
        if expected != self.location {
            return Err(SskError::LocationMismatch {
                expected,
                actual: self.location,
            });
        }
        Ok(())
    }

    /// Decrypt the payload with the subspace key and return its first
    /// declared-length bytes.
    pub fn decrypt(&self, subspace_key: &Key, cipher_algorithm: u16) -> SskResult<Vec<u8>> {
        self.decrypt_block(subspace_key, cipher_algorithm)
            .map(|block| block.data)
    }

    /// Like [`Self::decrypt`], also returning the metadata flag and the
    /// compression id.
    pub fn decrypt_block(&self, subspace_key: &Key, cipher_algorithm: u16) -> SskResult<DecryptedSsk> {
        if cipher_algorithm != CIPHER_AES_PCFB_256_SHA256 {
            return Err(SskError::UnsupportedAlgorithm {
                kind: AlgorithmKind::Cipher,
                id: cipher_algorithm,
            });
        }

        let mut plain_headers = Zeroizing::new([0u8; ENCRYPTED_HEADERS_SIZE]);
        plain_headers.copy_from_slice(self.header.encrypted_headers());
        let eh_docname = self.header.encrypted_docname_hash();
        PcfbMode::new(Rijndael256::new(subspace_key.as_bytes()), eh_docname.as_bytes())?
            .decipher(plain_headers.as_mut_slice());

        let mut payload_key = Zeroizing::new([0u8; DATA_DECRYPT_KEY_SIZE]);
        payload_key.copy_from_slice(&plain_headers[..DATA_DECRYPT_KEY_SIZE]);
        let length_field = u16::from_be_bytes([
            plain_headers[DATA_DECRYPT_KEY_SIZE],
            plain_headers[DATA_DECRYPT_KEY_SIZE + 1],
        ]);
        let compression_algorithm = i16::from_be_bytes([
            plain_headers[DATA_DECRYPT_KEY_SIZE + 2],
            plain_headers[DATA_DECRYPT_KEY_SIZE + 3],
        ]);
        let is_metadata = length_field & METADATA_FLAG != 0;
        let declared = usize::from(length_field & !METADATA_FLAG);

        // The payload key is unique per block, so it doubles as the IV
        let mut data = self.data.to_vec();
        PcfbMode::new(Rijndael256::new(&payload_key), payload_key.as_slice())?
            .decipher(&mut data);

        if declared > data.len() {
            data.zeroize();
            tracing::trace!(
                location = %self.location,
                declared,
                available = SSK_DATA_SIZE,
                "rejecting SSK: declared length too large"
            );
            return Err(SskError::LengthMismatch {
                declared,
                available: SSK_DATA_SIZE,
            });
        }
        data.truncate(declared);

        tracing::trace!(
            location = %self.location,
            len = declared,
            is_metadata,
            compression_algorithm,
            "SSK decrypted"
        );
        Ok(DecryptedSsk {
            data,
            is_metadata,
            compression_algorithm,
        })
    }
}

impl std::fmt::Debug for SskFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SskFound")
            .field("location", &self.location)
            .field("pubkey", &self.pubkey.hash())
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}
