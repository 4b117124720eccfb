use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SskError, SskResult};

/// Top-level CLI configuration (loaded from ssk.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SskConfig {
    pub log: LogConfig,
    pub verify: VerifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

/// Checks run when a record is loaded from disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Cross-check the stored location against the one derived from the
    /// public key hash and the header's encrypted docname hash (default: true)
    pub check_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            check_location: true,
        }
    }
}

impl SskConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str) -> SskResult<Self> {
        toml::from_str(content).map_err(|e| SskError::Config(e.to_string()))
    }

    /// Load the configuration at `path`, or the defaults if no file exists there.
    pub fn load(path: &Path) -> SskResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
                .map_err(|e| SskError::Config(format!("parsing {}: {e}", path.display())))
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> SskResult<String> {
        toml::to_string_pretty(self).map_err(|e| SskError::Config(e.to_string()))
    }
}
