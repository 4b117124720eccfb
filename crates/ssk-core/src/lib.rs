pub mod config;
pub mod error;
pub mod types;

pub use error::{AlgorithmKind, SskError, SskResult};
pub use types::Key;
