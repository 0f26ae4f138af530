//! Builds the effective configuration store from CLI arguments.

use super::ConfigError;
use super::cli::Cli;
use super::store::{Layered, MemoryStore};
use super::toml::TomlStore;

/// Store used by the command-line application.
///
/// `--set` overrides sit on top of the TOML file.
pub type CliStore = Layered<MemoryStore, TomlStore>;

/// Loads the configuration file (if any) and applies `--set` overrides.
///
/// Without `--config`, only the overrides are visible.
///
/// # Errors
///
/// Returns an error if:
/// - The config file cannot be read or parsed
/// - An override is not in `path=value` form
pub fn load_store(cli: &Cli) -> Result<CliStore, ConfigError> {
    let file = match cli.config {
        Some(ref path) => TomlStore::load(path)?,
        None => TomlStore::default(),
    };
    let overrides = MemoryStore::from_overrides(&cli.overrides)?;

    tracing::debug!(
        "Loaded {} setting(s) from file and {} override(s)",
        file.len(),
        overrides.len()
    );

    Ok(Layered::new(overrides, file))
}
