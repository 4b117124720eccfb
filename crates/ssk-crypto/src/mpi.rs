//! Multi-precision integer (MPI) codec
//!
//! Wire format:
//! ```text
//! [2 bytes: bit length L, big-endian][(L + 8) / 8 bytes: value, big-endian]
//! ```
//!
//! The value field is one byte wider than `ceil(L / 8)` whenever `L` is a
//! multiple of 8: it always has room for a leading sign bit. Readers and
//! writers must agree on this width for the DSA key block to parse.

use num_bigint::BigUint;
use ssk_core::{SskError, SskResult};

/// Number of value bytes that follow a bit-length prefix of `bits`.
pub fn value_len(bits: u16) -> usize {
    (usize::from(bits) + 8) / 8
}

/// Encode `n` as an MPI.
pub fn encode(n: &BigUint) -> SskResult<Vec<u8>> {
    let mut out = Vec::new();
    write(&mut out, n)?;
    Ok(out)
}

/// Append the MPI encoding of `n` to `out`.
pub fn write(out: &mut Vec<u8>, n: &BigUint) -> SskResult<()> {
    let bits = u16::try_from(n.bits())
        .map_err(|_| SskError::Encode(format!("MPI too large: {} bits", n.bits())))?;
    let width = value_len(bits);
    // ceil(bits / 8) <= width, and to_bytes_be() of zero is [0]
    let magnitude = n.to_bytes_be();

    out.reserve(2 + width);
    out.extend_from_slice(&bits.to_be_bytes());
    out.resize(out.len() + (width - magnitude.len()), 0);
    out.extend_from_slice(&magnitude);
    Ok(())
}

/// Read one MPI from the front of `input`, advancing it past the consumed bytes.
pub fn read(input: &mut &[u8]) -> SskResult<BigUint> {
    if input.len() < 2 {
        return Err(SskError::Decode(format!(
            "MPI length prefix truncated: {} bytes left",
            input.len()
        )));
    }
    let (prefix, rest) = input.split_at(2);
    let bits = u16::from_be_bytes([prefix[0], prefix[1]]);
    let width = value_len(bits);
    if rest.len() < width {
        return Err(SskError::Decode(format!(
            "MPI value truncated: need {width} bytes for {bits} bits, {} left",
            rest.len()
        )));
    }
    let (value, rest) = rest.split_at(width);
    *input = rest;
    Ok(BigUint::from_bytes_be(value))
}

/// Decode a single MPI from `bytes`, ignoring anything after it.
pub fn decode(bytes: &[u8]) -> SskResult<BigUint> {
    let mut input = bytes;
    read(&mut input)
}
