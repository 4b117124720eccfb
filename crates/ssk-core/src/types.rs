//! Protocol constants and the 32-byte [`Key`] value type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{SskError, SskResult};

/// Size of a routing key / symmetric key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of an SSK header in bytes.
pub const SSK_HEADER_SIZE: usize = 136;

/// Size of an SSK data payload in bytes.
pub const SSK_DATA_SIZE: usize = 1024;

/// Size of a padded DSA public-key block in bytes.
pub const PUBKEY_SIZE: usize = 1024;

/// Size of the encrypted blob inside the header: payload key, length, compression id.
pub const ENCRYPTED_HEADERS_SIZE: usize = 36;

/// Size of the payload decryption key carried in the encrypted blob.
pub const DATA_DECRYPT_KEY_SIZE: usize = 32;

/// Size of a persisted record: location ++ pubkey block ++ header ++ payload.
pub const RECORD_SIZE: usize = KEY_SIZE + PUBKEY_SIZE + SSK_HEADER_SIZE + SSK_DATA_SIZE;

/// Hash algorithm identifier for SHA-256, the only one accepted.
pub const HASH_SHA256: u16 = 1;

/// Cipher identifier for Rijndael-256 in PCFB mode, the only one accepted.
pub const CIPHER_AES_PCFB_256_SHA256: u16 = 2;

/// A 32-byte identifier, used both as a routing location and as a symmetric key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Key([u8; KEY_SIZE]);

impl Key {
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a key from a slice that must be exactly [`KEY_SIZE`] bytes.
    pub fn from_slice(bytes: &[u8]) -> SskResult<Self> {
        let arr: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| SskError::format("key", KEY_SIZE, bytes.len()))?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> SskResult<Self> {
        let bytes = hex::decode(s.trim()).map_err(|e| SskError::InvalidHex(format!("{s}: {e}")))?;
        Self::from_slice(&bytes)
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; KEY_SIZE]> for Key {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key({})", self.to_hex())
    }
}

impl std::str::FromStr for Key {
    type Err = SskError;

    fn from_str(s: &str) -> SskResult<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Key::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_size_matches_layout() {
        assert_eq!(RECORD_SIZE, 2216);
    }

    #[test]
    fn hex_roundtrip() {
        let key = Key::from_bytes([0xA5; KEY_SIZE]);
        let hex = key.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(hex.parse::<Key>().unwrap(), key);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        let result = Key::from_slice(&[0u8; 31]);
        assert!(matches!(
            result,
            Err(SskError::Format {
                expected: 32,
                actual: 31,
                ..
            })
        ));
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(Key::from_hex("zz"), Err(SskError::InvalidHex(_))));
        assert!(matches!(Key::from_hex("abcd"), Err(SskError::Format { .. })));
    }

    #[test]
    fn serde_as_hex_string() {
        let key = Key::from_bytes([1u8; KEY_SIZE]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
