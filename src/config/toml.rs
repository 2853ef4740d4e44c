//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Reachability probe configuration
    #[serde(default)]
    pub probe: ProbeSection,

    /// Hardware address resolution configuration
    #[serde(default)]
    pub identity: IdentitySection,

    /// Domain resolver configuration
    #[serde(default)]
    pub resolver: ResolverSection,
}

/// Reachability probe section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeSection {
    /// Address probed when none is given
    pub address: Option<String>,

    /// Seconds to wait for a response
    pub timeout: Option<u32>,

    /// Number of echo requests
    pub attempts: Option<u32>,
}

/// Hardware address resolution section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentitySection {
    /// Wired interface name
    pub wired_interface: Option<String>,

    /// Wireless interface name
    pub wireless_interface: Option<String>,

    /// Letter case: "compat", "lower" or "upper"
    pub mac_case: Option<String>,
}

/// Domain resolver section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverSection {
    /// Seconds to wait for a lookup
    pub timeout: Option<u64>,

    /// Maximum number of concurrent lookups
    pub max_concurrent: Option<usize>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# netstate configuration file
# Every value is optional; command-line flags take precedence.

[probe]
# Address probed by `netstate ping` when none is given (default: 223.5.5.5)
# address = "223.5.5.5"

# Seconds to wait for a response (default: 1)
timeout = 1

# Number of echo requests (default: 1)
# attempts = 1

[identity]
# Interfaces consulted when the connection does not report an address
# wired_interface = "eth0"
# wireless_interface = "wlan0"

# Letter case of resolved addresses: "compat", "lower" or "upper"
# "compat" upper-cases only addresses read from the wireless interface table
# mac_case = "compat"

[resolver]
# Seconds to wait for a lookup (default: 5)
timeout = 5

# Maximum number of concurrent lookups (default: 4)
# max_concurrent = 4
"#
    .to_string()
}
