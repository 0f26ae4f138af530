//! Read-only key/value access to hierarchical settings.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::ConfigError;
use super::defaults::PATH_SEPARATOR;

/// Read-only lookup of configuration values by hierarchical path.
///
/// Paths are `/`-separated strings such as `erp/general/connection_timeout`.
/// Values are returned as raw strings; typed interpretation is left to
/// callers such as [`ErpConfig`](super::ErpConfig).
///
/// # Example
///
/// ```
/// use erp_relay::config::{ConfigStore, MemoryStore};
///
/// let store = MemoryStore::new().with_value("erp/erp_a/active", "1");
/// assert_eq!(store.get_value("erp/erp_a/active").as_deref(), Some("1"));
/// assert_eq!(store.get_value("erp/erp_b/active"), None);
/// ```
pub trait ConfigStore: Send + Sync {
    /// Returns the value stored at `path`, if any.
    fn get_value(&self, path: &str) -> Option<String>;

    /// Lists the distinct child sections directly below `prefix`.
    ///
    /// A section is a path segment that has further segments beneath it,
    /// so `erp/erp_a/api_url` makes `erp_a` a section of `erp`. Stores that
    /// cannot enumerate their keys return an empty list.
    fn sections(&self, _prefix: &str) -> Vec<String> {
        Vec::new()
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn get_value(&self, path: &str) -> Option<String> {
        (**self).get_value(path)
    }

    fn sections(&self, prefix: &str) -> Vec<String> {
        (**self).sections(prefix)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Arc<T> {
    fn get_value(&self, path: &str) -> Option<String> {
        (**self).get_value(path)
    }

    fn sections(&self, prefix: &str) -> Vec<String> {
        (**self).sections(prefix)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Box<T> {
    fn get_value(&self, path: &str) -> Option<String> {
        (**self).get_value(path)
    }

    fn sections(&self, prefix: &str) -> Vec<String> {
        (**self).sections(prefix)
    }
}

/// Joins path segments with the configuration separator.
#[must_use]
pub fn join_path(segments: &[&str]) -> String {
    let mut path = String::new();
    for segment in segments {
        if !path.is_empty() {
            path.push(PATH_SEPARATOR);
        }
        path.push_str(segment);
    }
    path
}

/// In-memory configuration store.
///
/// Used for command-line overrides and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Sets a value, returning the updated store.
    #[must_use]
    pub fn with_value(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(path, value);
        self
    }

    /// Sets a value in place, replacing any previous one.
    pub fn set(&mut self, path: impl Into<String>, value: impl Into<String>) {
        self.values.insert(path.into(), value.into());
    }

    /// Parses `path=value` override strings into a store.
    ///
    /// The value may be empty (`erp/erp_a/active=`), which explicitly
    /// stores an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if an entry has no `=`
    /// or an empty path.
    pub fn from_overrides<I, T>(overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut store = Self::new();
        for entry in overrides {
            let entry = entry.as_ref();
            let Some((path, value)) = entry.split_once('=') else {
                return Err(ConfigError::InvalidOverride {
                    value: entry.to_string(),
                });
            };
            let path = path.trim();
            if path.is_empty() {
                return Err(ConfigError::InvalidOverride {
                    value: entry.to_string(),
                });
            }
            store.set(path, value.trim());
        }
        Ok(store)
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigStore for MemoryStore {
    fn get_value(&self, path: &str) -> Option<String> {
        self.values.get(path).cloned()
    }

    fn sections(&self, prefix: &str) -> Vec<String> {
        let mut lead = prefix.trim_end_matches(PATH_SEPARATOR).to_string();
        lead.push(PATH_SEPARATOR);

        let mut sections: Vec<String> = self
            .values
            .keys()
            .filter_map(|key| key.strip_prefix(&lead))
            .filter_map(|rest| rest.split_once(PATH_SEPARATOR))
            .map(|(section, _)| section.to_string())
            .filter(|section| !section.is_empty())
            .collect();
        sections.dedup();
        sections
    }
}

/// Two stores stacked on top of each other.
///
/// Lookups consult `primary` first and fall back to `fallback` when the
/// primary has no value for the path.
#[derive(Debug, Clone)]
pub struct Layered<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> Layered<P, F> {
    /// Creates a layered store.
    #[must_use]
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: ConfigStore, F: ConfigStore> ConfigStore for Layered<P, F> {
    fn get_value(&self, path: &str) -> Option<String> {
        self.primary
            .get_value(path)
            .or_else(|| self.fallback.get_value(path))
    }

    fn sections(&self, prefix: &str) -> Vec<String> {
        let mut sections = self.primary.sections(prefix);
        sections.extend(self.fallback.sections(prefix));
        sections.sort();
        sections.dedup();
        sections
    }
}
