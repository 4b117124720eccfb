//! Persisted SSK record format
//!
//! ```text
//! [0-31]      location
//! [32-1055]   padded DSA public key block
//! [1056-1191] SSK header
//! [1192-2215] encrypted payload
//! ```
//!
//! Loading a record re-runs signature verification; stored bytes are never
//! trusted just because they were written by us.

use ssk_core::types::{KEY_SIZE, PUBKEY_SIZE, RECORD_SIZE, SSK_HEADER_SIZE};
use ssk_core::{Key, SskError, SskResult};

use crate::found::SskFound;
use crate::header::SskHeader;
use crate::pubkey::PubKey;

const PUBKEY_OFFSET: usize = KEY_SIZE;
const HEADER_OFFSET: usize = PUBKEY_OFFSET + PUBKEY_SIZE;
const DATA_OFFSET: usize = HEADER_OFFSET + SSK_HEADER_SIZE;

impl SskFound {
    /// Serialize to the fixed [`RECORD_SIZE`]-byte record layout.
    pub fn to_bytes(&self) -> SskResult<Vec<u8>> {
        let mut out = Vec::with_capacity(RECORD_SIZE);
        out.extend_from_slice(self.location().as_bytes());
        out.extend_from_slice(&self.pubkey().to_padded_bytes()?);
        out.extend_from_slice(self.header().as_bytes());
        out.extend_from_slice(self.data());
        debug_assert_eq!(out.len(), RECORD_SIZE);
        Ok(out)
    }

    /// Parse and re-verify a record produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> SskResult<Self> {
        if bytes.len() != RECORD_SIZE {
            return Err(SskError::format("SSK record", RECORD_SIZE, bytes.len()));
        }
        let location = Key::from_slice(&bytes[..PUBKEY_OFFSET])?;
        let pubkey = PubKey::from_padded_bytes(&bytes[PUBKEY_OFFSET..HEADER_OFFSET])?;
        let header = SskHeader::parse(&bytes[HEADER_OFFSET..DATA_OFFSET])?;
        SskFound::new(location, header, &bytes[DATA_OFFSET..], pubkey)
    }
}
