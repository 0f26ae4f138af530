//! Request options and endpoint descriptions.

use std::time::Duration;

use serde::Serialize;

use crate::config::ErpConfiguration;

/// Transport options shared by every endpoint.
///
/// `attempts_count` is carried for external retry queues; the client itself
/// sends exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestOptions {
    /// Delivery attempts available to an external retry mechanism
    pub attempts_count: Option<u32>,
    /// Total time allowed for the exchange, in seconds
    pub execution_timeout: Option<u64>,
    /// Time allowed to establish the connection, in seconds
    pub connection_timeout: Option<u64>,
}

impl RequestOptions {
    /// Reads the options from the shared settings.
    #[must_use]
    pub fn from_configuration(config: &impl ErpConfiguration) -> Self {
        Self {
            attempts_count: config.attempts_count(),
            execution_timeout: config.execution_timeout(),
            connection_timeout: config.connection_timeout(),
        }
    }

    /// Total timeout as a [`Duration`].
    #[must_use]
    pub const fn execution_timeout_duration(&self) -> Option<Duration> {
        match self.execution_timeout {
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        }
    }

    /// Connection timeout as a [`Duration`].
    #[must_use]
    pub const fn connection_timeout_duration(&self) -> Option<Duration> {
        match self.connection_timeout {
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        }
    }
}

/// Resolved view of one endpoint, safe to print.
///
/// The bearer credential is never included; only its presence is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSummary {
    /// Endpoint type
    pub api_type: String,
    /// Configured URL, if any
    pub url: Option<String>,
    /// Whether the endpoint is enabled
    pub enabled: bool,
    /// Whether a bearer credential is configured
    pub has_credentials: bool,
    /// Shared transport options
    pub options: RequestOptions,
}
