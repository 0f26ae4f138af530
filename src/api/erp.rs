//! ERP API client bound to a single endpoint type.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{
    ApiError, EndpointSummary, HttpClient, HttpRequest, HttpResponse, RequestOptions,
    RequestResult, SendFailure,
};
use crate::config::{ConfigStore, ErpConfig, coerce_flag, defaults, join_path, key};

/// Trait for sending payloads to an ERP endpoint.
///
/// This abstraction lets callers such as queue workers be tested with fake
/// endpoints.
///
/// # Implementation Notes
///
/// Implementations must normalize every send failure into the returned
/// [`RequestResult`] and reserve `Err` for configuration errors. They must
/// not retry.
pub trait ErpSender: Send + Sync {
    /// Sends an already-serialized JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] only when the endpoint cannot be resolved.
    fn send_request(
        &self,
        payload: &str,
    ) -> impl std::future::Future<Output = Result<RequestResult, ApiError>> + Send;
}

/// HTTP client for one named ERP endpoint.
///
/// The endpoint type selects the configuration section read on every call:
/// `<namespace>/<type>/api_url`, `.../bearer`, and `.../active`. Timeouts and
/// the attempts count come from the shared `general` section. Nothing is
/// cached; every call re-reads the store.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The configuration store
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use erp_relay::api::{ErpApi, ReqwestClient};
/// use erp_relay::config::MemoryStore;
///
/// let store = MemoryStore::new()
///     .with_value("erp/erp_a/api_url", "https://erp-a.example.com/api")
///     .with_value("erp/erp_a/active", "1");
/// let api = ErpApi::new(ReqwestClient::new(), Arc::new(store), "erp_a");
///
/// assert_eq!(api.api_type().unwrap(), "erp_a");
/// assert!(api.is_api_enabled().unwrap());
/// ```
#[derive(Debug)]
pub struct ErpApi<H, S> {
    http: H,
    config: ErpConfig<Arc<S>>,
    api_type: String,
}

impl<H: Clone, S> Clone for ErpApi<H, S> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            api_type: self.api_type.clone(),
        }
    }
}

impl<H, S> ErpApi<H, S> {
    /// Creates a client bound to `api_type` under the default namespace.
    ///
    /// An empty type is accepted here but every type-dependent operation
    /// then fails with [`ApiError::ApiTypeNotDefined`].
    #[must_use]
    pub fn new(http: H, store: Arc<S>, api_type: impl Into<String>) -> Self {
        Self {
            http,
            config: ErpConfig::new(store),
            api_type: api_type.into(),
        }
    }

    /// Sets the top-level namespace of every key.
    #[must_use]
    pub fn with_namespace(self, namespace: impl Into<String>) -> Self {
        Self {
            config: self.config.with_namespace(namespace),
            ..self
        }
    }

    /// Returns the bound endpoint type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ApiTypeNotDefined`] if the type is empty.
    pub fn api_type(&self) -> Result<&str, ApiError> {
        if self.api_type.trim().is_empty() {
            return Err(ApiError::ApiTypeNotDefined);
        }
        Ok(&self.api_type)
    }

    /// Returns the shared settings provider.
    #[must_use]
    pub const fn configuration(&self) -> &ErpConfig<Arc<S>> {
        &self.config
    }

    fn endpoint_path(&self, field: &str) -> Result<String, ApiError> {
        let api_type = self.api_type()?;
        Ok(join_path(&[self.config.namespace(), api_type, field]))
    }
}

impl<H, S: ConfigStore> ErpApi<H, S> {
    fn endpoint_value(&self, field: &str) -> Result<Option<String>, ApiError> {
        let path = self.endpoint_path(field)?;
        Ok(self
            .config
            .store()
            .get_value(&path)
            .filter(|v| !v.trim().is_empty()))
    }

    /// Returns the configured endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ApiTypeNotDefined`] if the type is empty.
    pub fn endpoint_url(&self) -> Result<Option<String>, ApiError> {
        self.endpoint_value(key::API_URL)
    }

    /// Returns the configured bearer credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ApiTypeNotDefined`] if the type is empty.
    pub fn credentials(&self) -> Result<Option<String>, ApiError> {
        self.endpoint_value(key::BEARER)
    }

    /// Returns true if the endpoint's `active` flag is set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ApiTypeNotDefined`] if the type is empty.
    pub fn is_api_enabled(&self) -> Result<bool, ApiError> {
        let path = self.endpoint_path(key::ACTIVE)?;
        Ok(self
            .config
            .store()
            .get_value(&path)
            .is_some_and(|raw| coerce_flag(&raw)))
    }

    /// Returns the transport options shared by all endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ApiTypeNotDefined`] if the type is empty.
    pub fn options(&self) -> Result<RequestOptions, ApiError> {
        self.api_type()?;
        Ok(RequestOptions::from_configuration(&self.config))
    }

    /// Describes the endpoint without revealing its credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ApiTypeNotDefined`] if the type is empty.
    pub fn describe(&self) -> Result<EndpointSummary, ApiError> {
        Ok(EndpointSummary {
            api_type: self.api_type()?.to_string(),
            url: self.endpoint_url()?,
            enabled: self.is_api_enabled()?,
            has_credentials: self.credentials()?.is_some(),
            options: self.options()?,
        })
    }

    fn build_request(
        &self,
        url: Option<String>,
        options: &RequestOptions,
        payload: &str,
    ) -> Result<HttpRequest, SendFailure> {
        let Some(raw) = url else {
            return Err(SendFailure::MissingUrl {
                api_type: self.api_type.clone(),
            });
        };
        let url = url::Url::parse(raw.trim()).map_err(|e| SendFailure::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(HttpRequest::post(url)
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static(defaults::CONTENT_TYPE),
            )
            .with_body(payload.as_bytes().to_vec())
            .with_connect_timeout(options.connection_timeout_duration())
            .with_timeout(options.execution_timeout_duration()))
    }

    /// Converts a failure that happened before a response arrived.
    fn transport_failure(&self, failure: SendFailure) -> RequestResult {
        let result = RequestResult::from(failure);
        tracing::error!(
            api_type = %self.api_type,
            "{}",
            result.errors.as_deref().unwrap_or(defaults::GENERIC_FAILURE_MESSAGE)
        );
        result
    }
}

impl<H: HttpClient, S: ConfigStore> ErpApi<H, S> {
    /// Sends an already-serialized JSON payload with a single POST.
    ///
    /// A disabled endpoint yields `errors = "API disabled"` without any
    /// network traffic. Transport failures, non-200 statuses, and invalid
    /// JSON bodies are all returned inside the [`RequestResult`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ApiTypeNotDefined`] if the type is empty.
    pub async fn send_request(&self, payload: &str) -> Result<RequestResult, ApiError> {
        if !self.is_api_enabled()? {
            tracing::debug!(api_type = %self.api_type, "Endpoint disabled, request skipped");
            return Ok(RequestResult::disabled());
        }

        let url = self.endpoint_url()?;
        let options = self.options()?;

        let request = match self.build_request(url, &options, payload) {
            Ok(request) => request,
            Err(failure) => return Ok(self.transport_failure(failure)),
        };
        let request_url = request.url.clone();

        match self.http.request(request).await {
            Ok(response) => {
                log_exchange(&request_url, payload, &response);
                Ok(classify_response(&response).into())
            }
            Err(e) => Ok(self.transport_failure(e.into())),
        }
    }

    /// Serializes `payload` to JSON and sends it.
    ///
    /// A disabled endpoint is reported before the payload is touched. A
    /// serialization failure is normalized like a transport failure.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ApiTypeNotDefined`] if the type is empty.
    pub async fn send_json<T>(&self, payload: &T) -> Result<RequestResult, ApiError>
    where
        T: Serialize + Sync + ?Sized,
    {
        if !self.is_api_enabled()? {
            tracing::debug!(api_type = %self.api_type, "Endpoint disabled, request skipped");
            return Ok(RequestResult::disabled());
        }

        match serde_json::to_string(payload) {
            Ok(body) => self.send_request(&body).await,
            Err(e) => Ok(self.transport_failure(SendFailure::Serialize(e))),
        }
    }
}

impl<H: HttpClient, S: ConfigStore> ErpSender for ErpApi<H, S> {
    fn send_request(
        &self,
        payload: &str,
    ) -> impl std::future::Future<Output = Result<RequestResult, ApiError>> + Send {
        Self::send_request(self, payload)
    }
}

/// Records the completed exchange at debug level.
fn log_exchange(url: &url::Url, payload: &str, response: &HttpResponse) {
    tracing::debug!(
        url = %url,
        data = payload,
        response_headers = %response.headers_json(),
        response = %response.body_lossy(),
        "ERP request completed with status {}",
        response.status.as_u16()
    );
}

/// Interprets a completed exchange.
///
/// Only status 200 counts as success, and its body must be valid JSON.
fn classify_response(response: &HttpResponse) -> Result<Value, SendFailure> {
    if response.status != http::StatusCode::OK {
        return Err(SendFailure::BadResponse(response.status));
    }

    serde_json::from_slice(&response.body)
        .map_err(SendFailure::Decode)
}
