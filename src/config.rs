//! Dispatch configuration
//!
//! Tunable parameters for the dispatch cycle. Values can be provisioned
//! as JSON or restored from a postcard blob in non-volatile storage.

use serde::{Deserialize, Serialize};

/// Dispatch cycle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Minimum gap between two dispatch cycles (milliseconds)
    pub dispatch_interval_ms: u32,
    /// Maximum `send_update` calls per cycle (0 = unlimited)
    pub max_updates_per_cycle: u8,
    /// Bulk-clear non-extended dirty flags when the link comes up
    pub clear_on_connect: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            dispatch_interval_ms: 100, // 10 Hz
            max_updates_per_cycle: 0,
            clear_on_connect: true,
        }
    }
}

/// Errors from loading or validating a [`CoreConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// Stored blob failed deserialization.
    Corrupted,
    /// A field failed range validation.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Corrupted => Self::Config("corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

impl CoreConfig {
    /// Reject values the dispatch cycle cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatch_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("dispatch_interval_ms must be > 0"));
        }
        Ok(())
    }

    /// Parse and validate a JSON provisioning document.
    /// Missing fields take their default.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize for non-volatile storage.
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Corrupted)
    }

    /// Restore and validate a stored blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}
