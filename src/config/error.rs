//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid duration value (zero).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid value for a field.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid MAC letter case value.
    #[error("Invalid MAC case '{value}': expected compat, lower, or upper")]
    InvalidMacCase {
        /// The invalid value provided
        value: String,
    },
}

/// Well-known field names used in validation errors.
pub mod field {
    /// Probe address.
    pub const PROBE_ADDRESS: &str = "probe.address";
    /// Probe timeout.
    pub const PROBE_TIMEOUT: &str = "probe.timeout";
    /// Probe attempts.
    pub const PROBE_ATTEMPTS: &str = "probe.attempts";
    /// Wired interface name.
    pub const WIRED_INTERFACE: &str = "identity.wired_interface";
    /// Wireless interface name.
    pub const WIRELESS_INTERFACE: &str = "identity.wireless_interface";
    /// Resolver timeout.
    pub const RESOLVER_TIMEOUT: &str = "resolver.timeout";
    /// Resolver concurrency cap.
    pub const RESOLVER_MAX_CONCURRENT: &str = "resolver.max_concurrent";
}

impl ConfigError {
    /// Creates an `InvalidValue` error for `field`.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidDuration` error for a zero duration.
    #[must_use]
    pub fn zero_duration(field: &'static str) -> Self {
        Self::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        }
    }
}
