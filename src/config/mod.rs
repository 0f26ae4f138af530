//! Configuration layer for erp-relay.
//!
//! This module provides:
//! - Read-only settings lookup ([`ConfigStore`], [`MemoryStore`], [`Layered`])
//! - TOML configuration file support ([`TomlStore`], [`write_default_config`])
//! - Typed access to shared settings ([`ErpConfiguration`], [`ErpConfig`])
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Default values ([`defaults`])
//!
//! # Key Layout
//!
//! Every setting lives under a namespace (default `erp`):
//!
//! - `<namespace>/general/<key>` holds the settings shared by all endpoints
//!   (timeouts, attempts count, cron expressions, alert email, retention days)
//! - `<namespace>/<endpoint type>/api_url`, `.../bearer`, `.../active` hold
//!   the per-endpoint settings
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **`--set` overrides** - `path=value` pairs passed on the command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Unset** - getters return `None` (or `false` for flags)
//!
//! # Coercion
//!
//! Integer settings that are blank, zero, or not an unsigned decimal number
//! read as unset. Flags are false for blank, `0`, `false`, `no`, and `off`.

mod cli;
pub mod defaults;
mod error;
mod loader;
mod provider;
mod store;
mod toml;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod store_tests;

pub use self::toml::{TomlStore, default_config_template, write_default_config};
pub use cli::{Cli, Command, SendArgs};
pub use error::ConfigError;
pub use loader::{CliStore, load_store};
pub use provider::{ErpConfig, ErpConfiguration, GeneralSettings, coerce_flag, coerce_integer, key};
pub use store::{ConfigStore, Layered, MemoryStore, join_path};
