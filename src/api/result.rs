//! Normalized outcome of a send operation.

use serde::Serialize;
use serde_json::Value;

use super::SendFailure;
use crate::config::defaults;

/// Coarse classification of a failed send.
///
/// Lets callers branch on the kind of failure without matching on the
/// `errors` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The endpoint is switched off; no request was made.
    Disabled,
    /// The exchange did not complete (connection, timeout, URL, payload).
    Transport,
    /// The server answered with a status other than 200.
    BadStatus(u16),
    /// The 200 response body was not valid JSON.
    Decode,
}

impl From<&SendFailure> for FailureKind {
    fn from(failure: &SendFailure) -> Self {
        match failure {
            SendFailure::Disabled => Self::Disabled,
            SendFailure::BadResponse(status) => Self::BadStatus(status.as_u16()),
            SendFailure::Decode(_) => Self::Decode,
            SendFailure::MissingUrl { .. }
            | SendFailure::InvalidUrl { .. }
            | SendFailure::Serialize(_)
            | SendFailure::Transport(_) => Self::Transport,
        }
    }
}

/// Result of [`ErpApi::send_request`](super::ErpApi::send_request).
///
/// Both fields are always present. On success `response` holds the parsed
/// JSON body and `errors` is `None`; on any failure `response` is
/// [`Value::Null`] and `errors` holds a non-empty message.
///
/// Serializes as `{"response": ..., "errors": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestResult {
    /// Parsed response body, or `null` on failure
    pub response: Value,
    /// Failure message, or `None` on success
    pub errors: Option<String>,
    #[serde(skip)]
    failure: Option<FailureKind>,
}

impl RequestResult {
    /// Creates a successful result.
    #[must_use]
    pub const fn success(response: Value) -> Self {
        Self {
            response,
            errors: None,
            failure: None,
        }
    }

    /// Creates the result returned for a disabled endpoint.
    #[must_use]
    pub fn disabled() -> Self {
        Self::failed(FailureKind::Disabled, defaults::DISABLED_MESSAGE)
    }

    /// Creates a failed result with the given kind and message.
    ///
    /// A blank message is replaced by a generic one so `errors` is never
    /// empty.
    #[must_use]
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = defaults::GENERIC_FAILURE_MESSAGE.to_string();
        }

        Self {
            response: Value::Null,
            errors: Some(message),
            failure: Some(kind),
        }
    }

    /// Returns true if the request produced a response value.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors.is_none()
    }

    /// Returns true if the endpoint was disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.failure == Some(FailureKind::Disabled)
    }

    /// Returns the failure kind, if the request failed.
    #[must_use]
    pub const fn failure(&self) -> Option<FailureKind> {
        self.failure
    }
}

impl From<SendFailure> for RequestResult {
    fn from(failure: SendFailure) -> Self {
        Self::failed(FailureKind::from(&failure), failure.to_string())
    }
}

impl From<Result<Value, SendFailure>> for RequestResult {
    fn from(outcome: Result<Value, SendFailure>) -> Self {
        match outcome {
            Ok(value) => Self::success(value),
            Err(failure) => failure.into(),
        }
    }
}
