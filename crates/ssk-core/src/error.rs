use thiserror::Error;

use crate::types::Key;

pub type SskResult<T> = Result<T, SskError>;

/// Which algorithm identifier an [`SskError::UnsupportedAlgorithm`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    Hash,
    Cipher,
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgorithmKind::Hash => f.write_str("hash"),
            AlgorithmKind::Cipher => f.write_str("cipher"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SskError {
    /// A fixed-size buffer had the wrong length.
    #[error("{what}: expected {expected} bytes, got {actual}")]
    Format {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported {kind} algorithm id: {id}")]
    UnsupportedAlgorithm { kind: AlgorithmKind, id: u16 },

    #[error("DSA signature verification failed")]
    SignatureInvalid,

    #[error("declared data length {declared} exceeds decrypted length {available}")]
    LengthMismatch { declared: usize, available: usize },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("location mismatch: expected {expected}, got {actual}")]
    LocationMismatch { expected: Key, actual: Key },

    #[error("key mismatch: {0}")]
    KeyMismatch(&'static str),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SskError {
    /// Shorthand for a [`SskError::Format`] size check failure.
    pub fn format(what: &'static str, expected: usize, actual: usize) -> Self {
        SskError::Format {
            what,
            expected,
            actual,
        }
    }
}
