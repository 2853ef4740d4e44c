//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

pub use crate::identity::{DEFAULT_WIRED_INTERFACE, DEFAULT_WIRELESS_INTERFACE};
pub use crate::probe::{DEFAULT_ATTEMPTS as PROBE_ATTEMPTS, DEFAULT_PROBE_ADDRESS as PROBE_ADDRESS};
pub use crate::resolver::DEFAULT_MAX_CONCURRENT as RESOLVER_MAX_CONCURRENT;

/// Default probe timeout in seconds.
pub const PROBE_TIMEOUT_SECS: u32 = crate::probe::DEFAULT_TIMEOUT_SECS;

/// Default resolver timeout in seconds.
pub const RESOLVER_TIMEOUT_SECS: u64 = crate::resolver::DEFAULT_TIMEOUT.as_secs();

/// File name looked up in the user configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory under the user configuration directory.
pub const CONFIG_DIR_NAME: &str = "netstate";

