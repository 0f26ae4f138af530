//! Error types for configuration loading and parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from reading, parsing, and flattening configuration files
/// as well as malformed command-line overrides.
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

    /// A TOML value cannot be represented as a single configuration string.
    #[error("Unsupported value for '{key}': {kind} values cannot be used as settings")]
    UnsupportedValue {
        /// Flattened key of the offending value
        key: String,
        /// TOML type name of the value
        kind: &'static str,
    },

    /// Invalid `--set` override format.
    #[error("Invalid override '{value}': expected 'path/to/key=value'")]
    InvalidOverride {
        /// The invalid override string
        value: String,
    },
}
