//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::identity::{InterfaceNames, MacCase};
use crate::probe::ProbeTarget;

use super::cli::{Cli, Command};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Probe target and bounds
    pub probe: ProbeTarget,

    /// Interfaces consulted by the hardware address fallbacks
    pub interfaces: InterfaceNames,

    /// Letter case of resolved hardware addresses
    pub mac_case: MacCase,

    /// Time to wait for a domain lookup
    pub resolver_timeout: Duration,

    /// Maximum number of concurrent domain lookups
    pub max_concurrent: usize,

    /// Config file that was loaded, if any
    pub config_file: Option<PathBuf>,

    /// JSON output enabled
    pub json: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config_file = self
            .config_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ probe: {} ({}x/{}s), interfaces: {}/{}, mac_case: {}, \
             resolver: {}s/{} workers, file: {} }}",
            self.probe.address,
            self.probe.attempts,
            self.probe.timeout_secs,
            self.interfaces.wired,
            self.interfaces.wireless,
            self.mac_case,
            self.resolver_timeout.as_secs(),
            self.max_concurrent,
            config_file,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// Subcommand flags take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A timeout, attempt count or concurrency cap is zero
    /// - The probe address is empty or not safe to pass to `ping`
    /// - An interface name is empty
    /// - The MAC case is not recognized
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let probe = Self::resolve_probe(cli, toml)?;
        let interfaces = Self::resolve_interfaces(cli, toml)?;
        let mac_case = Self::resolve_mac_case(cli, toml)?;
        let resolver_timeout = Self::resolve_resolver_timeout(cli, toml)?;
        let max_concurrent = Self::resolve_max_concurrent(toml)?;

        Ok(Self {
            probe,
            interfaces,
            mac_case,
            resolver_timeout,
            max_concurrent,
            config_file: None,
            json: cli.json,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// Loads `cli.config` if set, otherwise the user config file if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .as_deref()
            .map(expand_home)
            .or_else(|| user_config_path().filter(|p| p.is_file()));

        let toml = path.as_deref().map(TomlConfig::load).transpose()?;

        let mut config = Self::from_raw(cli, toml.as_ref())?;
        config.config_file = path;
        Ok(config)
    }

    fn resolve_probe(cli: &Cli, toml: Option<&TomlConfig>) -> Result<ProbeTarget, ConfigError> {
        let section = toml.map(|t| &t.probe);
        let (cli_address, cli_timeout, cli_count) = match &cli.command {
            Some(Command::Ping {
                address,
                timeout,
                count,
            }) => (address.as_deref(), *timeout, *count),
            _ => (None, None, None),
        };

        // Priority: CLI explicit > TOML > default
        let address = cli_address
            .or_else(|| section.and_then(|s| s.address.as_deref()))
            .unwrap_or(defaults::PROBE_ADDRESS);

        let timeout_secs = cli_timeout
            .or_else(|| section.and_then(|s| s.timeout))
            .unwrap_or(defaults::PROBE_TIMEOUT_SECS);

        let attempts = cli_count
            .or_else(|| section.and_then(|s| s.attempts))
            .unwrap_or(defaults::PROBE_ATTEMPTS);

        if timeout_secs == 0 {
            return Err(ConfigError::zero_duration(field::PROBE_TIMEOUT));
        }

        if attempts == 0 {
            return Err(ConfigError::invalid(
                field::PROBE_ATTEMPTS,
                "must be greater than 0",
            ));
        }

        let target = ProbeTarget::new(address.trim())
            .with_timeout_secs(timeout_secs)
            .with_attempts(attempts);

        if !target.is_valid_address() {
            return Err(ConfigError::invalid(
                field::PROBE_ADDRESS,
                format!("'{address}' is not a host name or IP address"),
            ));
        }

        Ok(target)
    }

    fn resolve_interfaces(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<InterfaceNames, ConfigError> {
        let section = toml.map(|t| &t.identity);
        let (cli_wired, cli_wireless) = match &cli.command {
            Some(Command::Mac {
                wired_iface,
                wireless_iface,
                ..
            }) => (wired_iface.as_deref(), wireless_iface.as_deref()),
            _ => (None, None),
        };

        let wired = cli_wired
            .or_else(|| section.and_then(|s| s.wired_interface.as_deref()))
            .unwrap_or(defaults::DEFAULT_WIRED_INTERFACE);

        let wireless = cli_wireless
            .or_else(|| section.and_then(|s| s.wireless_interface.as_deref()))
            .unwrap_or(defaults::DEFAULT_WIRELESS_INTERFACE);

        Ok(InterfaceNames {
            wired: interface_name(field::WIRED_INTERFACE, wired)?,
            wireless: interface_name(field::WIRELESS_INTERFACE, wireless)?,
        })
    }

    fn resolve_mac_case(cli: &Cli, toml: Option<&TomlConfig>) -> Result<MacCase, ConfigError> {
        // CLI takes precedence
        if let Some(Command::Mac {
            mac_case: Some(case),
            ..
        }) = &cli.command
        {
            return Ok((*case).into());
        }

        // Fall back to TOML
        toml.and_then(|t| t.identity.mac_case.as_deref())
            .map_or(Ok(MacCase::default()), parse_mac_case)
    }

    fn resolve_resolver_timeout(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        let cli_timeout = match &cli.command {
            Some(Command::Resolve { timeout, .. }) => *timeout,
            _ => None,
        };

        // Priority: CLI explicit > TOML > default
        let seconds = cli_timeout
            .or_else(|| toml.and_then(|t| t.resolver.timeout))
            .unwrap_or(defaults::RESOLVER_TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::zero_duration(field::RESOLVER_TIMEOUT));
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_max_concurrent(toml: Option<&TomlConfig>) -> Result<usize, ConfigError> {
        let max_concurrent = toml
            .and_then(|t| t.resolver.max_concurrent)
            .unwrap_or(defaults::RESOLVER_MAX_CONCURRENT);

        if max_concurrent == 0 {
            return Err(ConfigError::invalid(
                field::RESOLVER_MAX_CONCURRENT,
                "must be greater than 0",
            ));
        }

        Ok(max_concurrent)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Expands a leading `~` component to the user's home directory.
///
/// Paths without one, or hosts without a home directory, are returned unchanged.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

// Helper functions

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(defaults::CONFIG_DIR_NAME)
            .join(defaults::CONFIG_FILE_NAME)
    })
}

fn interface_name(field: &'static str, name: &str) -> Result<String, ConfigError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    Ok(name.to_string())
}

fn parse_mac_case(s: &str) -> Result<MacCase, ConfigError> {
    match s.to_lowercase().as_str() {
        "compat" | "default" => Ok(MacCase::Compat),
        "lower" | "lowercase" => Ok(MacCase::Lower),
        "upper" | "uppercase" => Ok(MacCase::Upper),
        _ => Err(ConfigError::InvalidMacCase {
            value: s.to_string(),
        }),
    }
}
