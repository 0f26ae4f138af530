//! Typed access to the settings shared by every ERP endpoint.

use std::fmt;

use serde::Serialize;

use super::defaults;
use super::store::{ConfigStore, join_path};

/// Well-known keys of the shared `general` section.
///
/// Each constant is the last path segment; the full key is
/// `<namespace>/general/<key>`.
pub mod key {
    /// Cron expression for message sending.
    pub const CRON_SCHEDULE_SEND: &str = "cron_schedule_send";
    /// Cron expression for message deletion.
    pub const CRON_SCHEDULE_DELETE: &str = "cron_schedule_delete";
    /// Seconds allowed for establishing the connection.
    pub const CONNECTION_TIMEOUT: &str = "connection_timeout";
    /// Seconds allowed for the whole exchange.
    pub const EXECUTION_TIMEOUT: &str = "execution_timeout";
    /// Retry attempts available to the external queue.
    pub const ATTEMPTS_COUNT: &str = "attempts_count";
    /// Alert recipient address.
    pub const ALERT_EMAIL: &str = "alert_email";
    /// Retention window for queued messages, in days.
    pub const DAYS_COUNT: &str = "days_count";

    /// Endpoint base URL.
    pub const API_URL: &str = "api_url";
    /// Endpoint bearer credential.
    pub const BEARER: &str = "bearer";
    /// Endpoint enabled flag.
    pub const ACTIVE: &str = "active";
}

/// Read-only accessor for the shared ERP settings.
///
/// Every getter maps to exactly one key and returns `None` when the key is
/// unset or its value cannot be coerced.
pub trait ErpConfiguration: Send + Sync {
    /// Cron expression for message sending.
    fn cron_sending_schedule(&self) -> Option<String>;

    /// Cron expression for message deletion.
    fn cron_deletion_schedule(&self) -> Option<String>;

    /// Connection timeout in seconds.
    fn connection_timeout(&self) -> Option<u64>;

    /// Execution timeout in seconds.
    fn execution_timeout(&self) -> Option<u64>;

    /// Retry attempt count.
    fn attempts_count(&self) -> Option<u32>;

    /// Alert email recipient address.
    fn alert_email(&self) -> Option<String>;

    /// Days to keep queued messages.
    fn days_count(&self) -> Option<u64>;
}

/// [`ErpConfiguration`] backed by a [`ConfigStore`].
///
/// # Example
///
/// ```
/// use erp_relay::config::{ErpConfig, ErpConfiguration, MemoryStore};
///
/// let store = MemoryStore::new().with_value("erp/general/connection_timeout", "15");
/// let config = ErpConfig::new(store);
///
/// assert_eq!(config.connection_timeout(), Some(15));
/// assert_eq!(config.execution_timeout(), None);
/// ```
#[derive(Debug, Clone)]
pub struct ErpConfig<S> {
    store: S,
    namespace: String,
}

impl<S> ErpConfig<S> {
    /// Creates a provider reading under the default namespace.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            namespace: defaults::NAMESPACE.to_string(),
        }
    }

    /// Sets the top-level namespace of every key.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Returns the configured namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the full key of a `general` setting.
    #[must_use]
    pub fn general_path(&self, key: &str) -> String {
        join_path(&[&self.namespace, defaults::GENERAL_SECTION, key])
    }
}

impl<S: ConfigStore> ErpConfig<S> {
    fn config_value(&self, key: &str) -> Option<String> {
        self.store.get_value(&self.general_path(key))
    }

    fn string_value(&self, key: &str) -> Option<String> {
        self.config_value(key).filter(|v| !v.trim().is_empty())
    }

    fn integer_value<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr + PartialEq + Default,
    {
        let raw = self.config_value(key)?;
        coerce_integer(&raw).unwrap_or_else(|| {
            tracing::warn!(
                "Ignoring non-numeric value '{raw}' for {}",
                self.general_path(key)
            );
            None
        })
    }

    /// Captures all shared settings at once.
    #[must_use]
    pub fn snapshot(&self) -> GeneralSettings {
        GeneralSettings {
            cron_schedule_send: self.cron_sending_schedule(),
            cron_schedule_delete: self.cron_deletion_schedule(),
            connection_timeout: self.connection_timeout(),
            execution_timeout: self.execution_timeout(),
            attempts_count: self.attempts_count(),
            alert_email: self.alert_email(),
            days_count: self.days_count(),
        }
    }
}

impl<S: ConfigStore> ErpConfiguration for ErpConfig<S> {
    fn cron_sending_schedule(&self) -> Option<String> {
        self.string_value(key::CRON_SCHEDULE_SEND)
    }

    fn cron_deletion_schedule(&self) -> Option<String> {
        self.string_value(key::CRON_SCHEDULE_DELETE)
    }

    fn connection_timeout(&self) -> Option<u64> {
        self.integer_value(key::CONNECTION_TIMEOUT)
    }

    fn execution_timeout(&self) -> Option<u64> {
        self.integer_value(key::EXECUTION_TIMEOUT)
    }

    fn attempts_count(&self) -> Option<u32> {
        self.integer_value(key::ATTEMPTS_COUNT)
    }

    fn alert_email(&self) -> Option<String> {
        self.string_value(key::ALERT_EMAIL)
    }

    fn days_count(&self) -> Option<u64> {
        self.integer_value(key::DAYS_COUNT)
    }
}

/// Interprets a raw setting as a positive integer.
///
/// Returns `Some(None)` for values that are blank or zero (treated as
/// unset), `Some(Some(n))` for positive integers, and `None` when the value
/// is not an unsigned decimal number.
#[must_use]
pub fn coerce_integer<T>(raw: &str) -> Option<Option<T>>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(None);
    }

    let value = trimmed.parse::<T>().ok()?;
    if value == T::default() {
        Some(None)
    } else {
        Some(Some(value))
    }
}

/// Interprets a raw setting as a flag.
///
/// Blank, `0`, `false`, `no`, and `off` (case-insensitive) are false.
/// Any other value is true.
#[must_use]
pub fn coerce_flag(raw: &str) -> bool {
    let trimmed = raw.trim();
    !(trimmed.is_empty()
        || trimmed == "0"
        || trimmed.eq_ignore_ascii_case("false")
        || trimmed.eq_ignore_ascii_case("no")
        || trimmed.eq_ignore_ascii_case("off"))
}

/// Point-in-time view of every shared setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneralSettings {
    /// Cron expression for message sending
    pub cron_schedule_send: Option<String>,
    /// Cron expression for message deletion
    pub cron_schedule_delete: Option<String>,
    /// Connection timeout in seconds
    pub connection_timeout: Option<u64>,
    /// Execution timeout in seconds
    pub execution_timeout: Option<u64>,
    /// Retry attempt count
    pub attempts_count: Option<u32>,
    /// Alert recipient address
    pub alert_email: Option<String>,
    /// Retention window in days
    pub days_count: Option<u64>,
}

impl fmt::Display for GeneralSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show<T: fmt::Display>(value: Option<&T>) -> String {
            value.map_or_else(|| "unset".to_string(), ToString::to_string)
        }

        write!(
            f,
            "Settings {{ connection_timeout: {}, execution_timeout: {}, attempts: {}, \
             days: {}, send_cron: {}, delete_cron: {}, alert_email: {} }}",
            show(self.connection_timeout.as_ref()),
            show(self.execution_timeout.as_ref()),
            show(self.attempts_count.as_ref()),
            show(self.days_count.as_ref()),
            show(self.cron_schedule_send.as_ref()),
            show(self.cron_schedule_delete.as_ref()),
            show(self.alert_email.as_ref()),
        )
    }
}
