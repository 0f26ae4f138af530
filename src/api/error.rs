//! Error types for ERP API operations.

use thiserror::Error;

use crate::config::defaults;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong on the wire without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors. Displays the underlying message only.
    #[error("{0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// Either the connection or the whole exchange exceeded its configured
    /// timeout.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Configuration errors that cross the client boundary.
///
/// These are the only failures [`ErpApi`](super::ErpApi) returns as `Err`;
/// everything that happens while sending is normalized into a
/// [`RequestResult`](super::RequestResult).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The client is not bound to an endpoint type.
    #[error("API type is not defined")]
    ApiTypeNotDefined,

    /// The factory has no endpoint registered under this key.
    #[error("Unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    /// An endpoint mapping failed validation.
    #[error("Invalid endpoint type '{value}': {reason}")]
    InvalidEndpointType {
        /// The rejected key or type
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
}

/// Reasons a send attempt did not produce a response value.
///
/// Never returned to callers directly; converted into the `errors` field of
/// a [`RequestResult`](super::RequestResult).
#[derive(Debug, Error)]
pub enum SendFailure {
    /// The endpoint is switched off.
    #[error("{}", defaults::DISABLED_MESSAGE)]
    Disabled,

    /// The endpoint has no URL configured.
    #[error("Endpoint URL is not configured for '{api_type}'")]
    MissingUrl {
        /// Endpoint type whose URL is missing
        api_type: String,
    },

    /// The configured URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The configured URL string
        url: String,
        /// Parser message
        reason: String,
    },

    /// The payload could not be serialized to JSON.
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The HTTP exchange did not complete.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The server answered with a status other than 200.
    #[error("Bad response {}", .0.as_u16())]
    BadResponse(http::StatusCode),

    /// The 200 response body is not valid JSON.
    #[error("{0}")]
    Decode(#[source] serde_json::Error),
}
