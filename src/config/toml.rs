//! TOML configuration file support.
//!
//! The file is a free-form tree of tables. Every scalar leaf is flattened
//! into a `/`-joined key, so
//!
//! ```toml
//! [erp.erp_a]
//! active = true
//! ```
//!
//! becomes `erp/erp_a/active = "1"`.

use std::path::Path;

use toml::{Table, Value};

use super::ConfigError;
use super::defaults::PATH_SEPARATOR;
use super::store::{ConfigStore, MemoryStore};

/// Configuration store loaded from a TOML document.
#[derive(Debug, Clone, Default)]
pub struct TomlStore {
    values: MemoryStore,
}

impl TomlStore {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or flattened.
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
    /// Returns an error if the TOML is invalid or contains arrays.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let table: Table = toml::from_str(content)?;
        let mut values = MemoryStore::new();
        flatten_table(&table, "", &mut values)?;
        Ok(Self { values })
    }

    /// Returns the number of flattened settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the document held no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigStore for TomlStore {
    fn get_value(&self, path: &str) -> Option<String> {
        self.values.get_value(path)
    }

    fn sections(&self, prefix: &str) -> Vec<String> {
        self.values.sections(prefix)
    }
}

fn flatten_table(table: &Table, prefix: &str, out: &mut MemoryStore) -> Result<(), ConfigError> {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{PATH_SEPARATOR}{key}")
        };

        match value {
            Value::Table(child) => flatten_table(child, &path, out)?,
            Value::String(s) => out.set(path, s.as_str()),
            Value::Integer(i) => out.set(path, i.to_string()),
            Value::Float(f) => out.set(path, f.to_string()),
            // Booleans follow the 1/0 convention of the settings store
            Value::Boolean(b) => out.set(path, if *b { "1" } else { "0" }),
            Value::Datetime(dt) => out.set(path, dt.to_string()),
            Value::Array(_) => {
                return Err(ConfigError::UnsupportedValue {
                    key: path,
                    kind: "array",
                });
            }
        }
    }
    Ok(())
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, default_config_template()).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# erp-relay configuration file
#
# Every setting is addressed by its path, e.g. erp/general/connection_timeout.
# Values given with --set path=value on the command line take precedence.

[erp.general]
# Cron expression used by the external sender job
# cron_schedule_send = "*/5 * * * *"

# Cron expression used by the external cleanup job
# cron_schedule_delete = "0 3 * * *"

# Seconds to wait for the connection to be established
connection_timeout = 10

# Seconds allowed for the whole request
execution_timeout = 30

# Delivery attempts available to the external retry queue
attempts_count = 3

# Recipient of delivery failure alerts
# alert_email = "ops@example.com"

# Days to keep queued messages before cleanup
days_count = 7

# One table per endpoint. The table name is the endpoint type.
[erp.erp_a]
active = false
# api_url = "https://erp-a.example.com/api/orders"
# bearer = "your-token-here"

[erp.erp_b]
active = false
# api_url = "https://erp-b.example.com/import"
# bearer = "your-token-here"
"#
    .to_string()
}
