//! Construction of [`ErpApi`] clients by logical endpoint key.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ApiError, ErpApi};
use crate::config::{ConfigStore, defaults};

/// Registry mapping logical endpoint keys to endpoint types.
///
/// Every mapping is validated when the factory is built, so a bad key
/// fails at startup instead of on the first send. Clients share one HTTP
/// client and one configuration store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use erp_relay::api::{ApiFactory, ReqwestClient};
/// use erp_relay::config::MemoryStore;
///
/// let factory = ApiFactory::new(
///     ReqwestClient::new(),
///     Arc::new(MemoryStore::new()),
///     [("orders", "erp_a"), ("invoices", "erp_b")],
/// )
/// .unwrap();
///
/// let api = factory.create("orders").unwrap();
/// assert_eq!(api.api_type().unwrap(), "erp_a");
/// assert!(factory.create("refunds").is_err());
/// ```
#[derive(Debug)]
pub struct ApiFactory<H, S> {
    http: H,
    store: Arc<S>,
    namespace: String,
    api_map: BTreeMap<String, String>,
}

impl<H: Clone, S: ConfigStore> ApiFactory<H, S> {
    /// Creates a factory from `(key, endpoint type)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpointType`] if a key or type is empty,
    /// a type contains characters other than ASCII alphanumerics, `_`, or
    /// `-`, a type names the reserved `general` section, or a key is
    /// registered twice.
    pub fn new<I, K, V>(http: H, store: Arc<S>, api_map: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (key, api_type) in api_map {
            let key = key.into();
            let api_type = api_type.into();
            validate_key(&key)?;
            validate_api_type(&api_type)?;
            if map.insert(key.clone(), api_type).is_some() {
                return Err(ApiError::InvalidEndpointType {
                    value: key,
                    reason: "registered more than once",
                });
            }
        }

        Ok(Self {
            http,
            store,
            namespace: defaults::NAMESPACE.to_string(),
            api_map: map,
        })
    }

    /// Creates a factory with one entry per endpoint section in the store.
    ///
    /// Every section below `namespace` except `general` becomes an endpoint
    /// whose key equals its type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpointType`] if a section name is not a
    /// valid endpoint type.
    pub fn from_store_sections(
        http: H,
        store: Arc<S>,
        namespace: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let namespace = namespace.into();
        let sections: Vec<String> = store
            .sections(&namespace)
            .into_iter()
            .filter(|section| section != defaults::GENERAL_SECTION)
            .collect();

        tracing::debug!(
            "Discovered {} endpoint(s) under '{namespace}': {sections:?}",
            sections.len()
        );

        let pairs = sections.into_iter().map(|s| (s.clone(), s));
        Ok(Self::new(http, store, pairs)?.with_namespace(namespace))
    }

    /// Sets the namespace passed on to created clients.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Creates the client registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownEndpoint`] if no mapping exists for `key`.
    pub fn create(&self, key: &str) -> Result<ErpApi<H, S>, ApiError> {
        let api_type = self
            .api_map
            .get(key)
            .ok_or_else(|| ApiError::UnknownEndpoint(key.to_string()))?;

        Ok(ErpApi::new(self.http.clone(), Arc::clone(&self.store), api_type.as_str())
            .with_namespace(self.namespace.as_str()))
    }

    /// Returns the registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.api_map.keys().map(String::as_str)
    }

    /// Returns the number of registered endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.api_map.len()
    }

    /// Returns true if no endpoints are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.api_map.is_empty()
    }
}

fn validate_key(key: &str) -> Result<(), ApiError> {
    if key.trim().is_empty() {
        return Err(ApiError::InvalidEndpointType {
            value: key.to_string(),
            reason: "key must not be empty",
        });
    }
    Ok(())
}

fn validate_api_type(api_type: &str) -> Result<(), ApiError> {
    let reason = if api_type.is_empty() {
        "endpoint type must not be empty"
    } else if !api_type
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        "only ASCII letters, digits, '_' and '-' are allowed"
    } else if api_type == defaults::GENERAL_SECTION {
        "'general' is reserved for shared settings"
    } else {
        return Ok(());
    };

    Err(ApiError::InvalidEndpointType {
        value: api_type.to_string(),
        reason,
    })
}
