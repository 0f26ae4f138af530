//! Production HTTP client implementation using reqwest.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` that implements the
/// [`HttpClient`] trait. reqwest only applies connect timeouts at client
/// construction, so requests that carry one are sent through a client built
/// for that timeout. Those clients are cached per timeout value and shared by
/// clones, so connections stay pooled. The total timeout is applied per
/// request.
///
/// # Example
///
/// ```no_run
/// use erp_relay::api::{ReqwestClient, HttpClient, HttpRequest};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://erp.example.com/api")?;
/// let request = HttpRequest::post(url)
///     .with_body(br#"{"id":1}"#.to_vec())
///     .with_timeout(Some(Duration::from_secs(30)));
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    timed: Arc<Mutex<HashMap<Duration, reqwest::Client>>>,
}

impl ReqwestClient {
    /// Creates a new HTTP client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_client(reqwest::Client::new())
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// The given client is used only for requests without a connect
    /// timeout. Requests that set one bypass it and use a default-built
    /// client carrying that timeout.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            inner: client,
            timed: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Picks the reqwest client for a request.
    fn client_for(&self, req: &HttpRequest) -> Result<reqwest::Client, HttpError> {
        let Some(connect_timeout) = req.connect_timeout else {
            return Ok(self.inner.clone());
        };

        let mut timed = self.timed.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = timed.get(&connect_timeout) {
            return Ok(client.clone());
        }

        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| HttpError::Connection(Box::new(e)))?;
        tracing::debug!("Built HTTP client with connect timeout {connect_timeout:?}");
        timed.insert(connect_timeout, client.clone());
        Ok(client)
    }

    /// Number of cached connect-timeout clients.
    #[cfg(test)]
    pub(super) fn timed_client_count(&self) -> usize {
        self.timed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let client = self.client_for(&req)?;
        let mut builder = client.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(timeout) = req.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
