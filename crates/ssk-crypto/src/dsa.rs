//! DSA signature verification
//!
//! Verification only; SSK blocks are signed elsewhere. Message digests are
//! masked to their low 255 bits before they reach [`verify`], matching what
//! signers do.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::pubkey::PubKey;

/// Number of low-order digest bits that take part in signing.
pub const SIGNATURE_MASK_BITS: usize = 255;

/// An (R, S) signature pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaSignature {
    r: BigUint,
    s: BigUint,
}

impl DsaSignature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// Read R and S as unsigned big-endian integers.
    pub fn from_bytes(r: &[u8], s: &[u8]) -> Self {
        Self {
            r: BigUint::from_bytes_be(r),
            s: BigUint::from_bytes_be(s),
        }
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }
}

/// `digest AND (2^255 - 1)`, as a big-endian value of the same length as `digest`.
pub fn mask_digest(digest: &[u8]) -> Vec<u8> {
    let mut masked = digest.to_vec();
    let keep_bytes = SIGNATURE_MASK_BITS.div_ceil(8);
    let cut = masked.len().saturating_sub(keep_bytes);
    masked[..cut].fill(0);
    if masked.len() >= keep_bytes {
        // 255 = 31 * 8 + 7: keep only the low 7 bits of the top byte
        masked[cut] &= 0x7F;
    }
    masked
}

/// Verify `signature` over the already-masked message integer `m`.
pub fn verify(pubkey: &PubKey, signature: &DsaSignature, m: &BigUint) -> bool {
    let group = pubkey.group();
    let (p, q, g) = (group.p(), group.q(), group.g());
    let (r, s) = (&signature.r, &signature.s);

    if r.is_zero() || s.is_zero() || r >= q || s >= q {
        return false;
    }

    // q is prime, so s^(q-2) is the inverse of s mod q
    let w = s.modpow(&(q - 2u32), q);
    let u1 = (m * &w) % q;
    let u2 = (r * &w) % q;
    let v = ((g.modpow(&u1, p) * pubkey.y().modpow(&u2, p)) % p) % q;

    &v == r
}
