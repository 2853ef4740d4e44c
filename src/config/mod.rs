//! Configuration layer for netstate.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Subcommand flags such as `ping --timeout`
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Every setting has a default, so netstate runs without a config file.
//!
//! # Config file location
//!
//! `--config` names the file explicitly; a leading `~` is expanded to the
//! home directory. Without it, `<config dir>/netstate/config.toml` is loaded
//! if it exists (for example `~/.config/netstate/config.toml` on Linux).
//!
//! # CLI-Only vs TOML-Only Options
//!
//! `resolver.max_concurrent` is TOML-only;
//! per-invocation flags live on the subcommands that use them.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command, MacCaseArg, WifiStateArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, expand_home, write_default_config};
