//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::identity::MacCase;

/// netstate: network state and identity resolver
///
/// Answers one-shot questions about the host's current network: its class,
/// reachability, hardware address and name resolution.
#[derive(Debug, Parser)]
#[command(name = "netstate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: status)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Subcommands for netstate
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the active network snapshot and its class
    Status,

    /// Print the active network class
    Class,

    /// Probe an address with a single bounded ping
    Ping {
        /// Address to probe
        address: Option<String>,

        /// Seconds to wait for a response
        #[arg(long)]
        timeout: Option<u32>,

        /// Number of echo requests
        #[arg(long, short = 'n')]
        count: Option<u32>,
    },

    /// Print the host's hardware (MAC) address
    Mac {
        /// Follow the active connection instead of preferring wired sources
        #[arg(long = "connection-aware")]
        connection_aware: bool,

        /// Wired interface consulted by the table fallback
        #[arg(long = "wired-iface", value_name = "NAME")]
        wired_iface: Option<String>,

        /// Wireless interface consulted by the table fallback
        #[arg(long = "wireless-iface", value_name = "NAME")]
        wireless_iface: Option<String>,

        /// Letter case of the printed address
        #[arg(long = "mac-case", value_enum)]
        mac_case: Option<MacCaseArg>,
    },

    /// Print the first local IP address
    Ip {
        /// Look up an IPv6 address instead of IPv4
        #[arg(long)]
        ipv6: bool,
    },

    /// Resolve a domain name to its first address
    Resolve {
        /// Domain to resolve
        domain: String,

        /// Seconds to wait for the lookup
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Turn the Wi-Fi radio on or off
    Wifi {
        /// Requested radio state
        #[arg(value_enum)]
        state: WifiStateArg,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "netstate.toml")]
        output: PathBuf,
    },
}

/// MAC letter case argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MacCaseArg {
    /// Upper-case only addresses read from the wireless interface table
    Compat,
    /// Lower-case every address
    Lower,
    /// Upper-case every address
    Upper,
}

impl From<MacCaseArg> for MacCase {
    fn from(arg: MacCaseArg) -> Self {
        match arg {
            MacCaseArg::Compat => Self::Compat,
            MacCaseArg::Lower => Self::Lower,
            MacCaseArg::Upper => Self::Upper,
        }
    }
}

/// Wi-Fi radio state argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WifiStateArg {
    /// Radio on
    On,
    /// Radio off
    Off,
}

impl WifiStateArg {
    /// Returns true for [`WifiStateArg::On`].
    #[must_use]
    pub const fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Subcommand to run, defaulting to [`Command::Status`].
    #[must_use]
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Status)
    }
}
