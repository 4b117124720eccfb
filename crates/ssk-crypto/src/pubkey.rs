//! DSA public key codec
//!
//! Padded block format (always [`PUBKEY_SIZE`] bytes):
//! ```text
//! MPI(p) ++ MPI(q) ++ MPI(g) ++ MPI(y) ++ zero padding
//! ```
//!
//! The key's identity is SHA-256 of the unpadded encoding, which is what
//! locations are derived from.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use sha2::{Digest, Sha256};
use ssk_core::types::PUBKEY_SIZE;
use ssk_core::{Key, SskError, SskResult};

use crate::mpi;

/// DSA domain parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct DsaGroup {
    p: BigUint,
    q: BigUint,
    g: BigUint,
}

impl DsaGroup {
    /// Build a group, rejecting parameters no DSA verifier can work with.
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> SskResult<Self> {
        if p.is_zero() || q.is_zero() {
            return Err(SskError::Decode("DSA group: p and q must be positive".into()));
        }
        if q >= p {
            return Err(SskError::Decode("DSA group: q must be smaller than p".into()));
        }
        if g <= BigUint::one() || g >= p {
            return Err(SskError::Decode("DSA group: g must lie in (1, p)".into()));
        }
        Ok(Self { p, q, g })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    fn write(&self, out: &mut Vec<u8>) -> SskResult<()> {
        mpi::write(out, &self.p)?;
        mpi::write(out, &self.q)?;
        mpi::write(out, &self.g)
    }

    fn read(input: &mut &[u8]) -> SskResult<Self> {
        let p = mpi::read(input)?;
        let q = mpi::read(input)?;
        let g = mpi::read(input)?;
        Self::new(p, q, g)
    }
}

impl std::fmt::Debug for DsaGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DsaGroup")
            .field("p_bits", &self.p.bits())
            .field("q_bits", &self.q.bits())
            .finish()
    }
}

/// A DSA public key: group parameters plus the public value `y`.
#[derive(Clone)]
pub struct PubKey {
    group: DsaGroup,
    y: BigUint,
    hash: Key,
}

impl PubKey {
    pub fn new(group: DsaGroup, y: BigUint) -> SskResult<Self> {
        if y.is_zero() || &y >= group.p() {
            return Err(SskError::Decode("DSA public value y must lie in (0, p)".into()));
        }
        let mut unpadded = Vec::new();
        group.write(&mut unpadded)?;
        mpi::write(&mut unpadded, &y)?;
        let hash = Key::from_bytes(Sha256::digest(&unpadded).into());
        Ok(Self { group, y, hash })
    }

    pub fn group(&self) -> &DsaGroup {
        &self.group
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// SHA-256 of the unpadded encoding.
    pub fn hash(&self) -> Key {
        self.hash
    }

    /// Unpadded encoding: group MPIs followed by `y`.
    pub fn as_bytes(&self) -> SskResult<Vec<u8>> {
        let mut out = Vec::new();
        self.group.write(&mut out)?;
        mpi::write(&mut out, &self.y)?;
        Ok(out)
    }

    /// Encoding zero-padded to exactly [`PUBKEY_SIZE`] bytes.
    pub fn to_padded_bytes(&self) -> SskResult<Vec<u8>> {
        let mut out = self.as_bytes()?;
        if out.len() > PUBKEY_SIZE {
            return Err(SskError::Encode(format!(
                "public key encoding is {} bytes, block holds {PUBKEY_SIZE}",
                out.len()
            )));
        }
        out.resize(PUBKEY_SIZE, 0);
        Ok(out)
    }

    /// Decode a padded key block. The block must be exactly [`PUBKEY_SIZE`] bytes;
    /// whatever follows `y` inside it is ignored.
    pub fn from_padded_bytes(bytes: &[u8]) -> SskResult<Self> {
        if bytes.len() != PUBKEY_SIZE {
            return Err(SskError::format("public key block", PUBKEY_SIZE, bytes.len()));
        }
        let mut input = bytes;
        let group = DsaGroup::read(&mut input)?;
        let y = mpi::read(&mut input)?;
        Self::new(group, y)
    }
}

impl PartialEq for PubKey {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.y == other.y
    }
}

impl Eq for PubKey {}

impl std::fmt::Debug for PubKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubKey")
            .field("group", &self.group)
            .field("hash", &self.hash)
            .finish()
    }
}
