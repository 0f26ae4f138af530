//! Application execution logic.
//!
//! This module resolves the requested endpoint, sends the payload once,
//! and prints the normalized result.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use erp_relay::api::{ApiError, ApiFactory, ErpSender, RequestResult, ReqwestClient};
use erp_relay::config::{CliStore, Command, ConfigStore, SendArgs};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The endpoint could not be resolved from configuration.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Failed to read the payload file.
    #[error("Failed to read payload from '{}': {source}", path.display())]
    PayloadRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not valid JSON.
    #[error("Payload is not valid JSON: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    /// Failed to print the result.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

impl RunError {
    /// Returns true if the failure stems from configuration rather than the exchange.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

/// How a completed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command finished without errors.
    Completed,
    /// The request ran but its result carries an error message.
    RequestFailed,
}

/// Runs a subcommand against the loaded configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The endpoint is unknown or a configured section name is invalid
/// - The payload cannot be read or is not JSON
/// - The result cannot be written to stdout
#[cfg(not(tarpaulin_include))]
pub async fn execute(
    command: &Command,
    store: CliStore,
    namespace: &str,
) -> Result<Outcome, RunError> {
    let factory =
        ApiFactory::from_store_sections(ReqwestClient::new(), Arc::new(store), namespace)?;
    tracing::debug!("{} endpoint(s) available", factory.len());

    match command {
        Command::Send(args) => {
            let api = factory.create(&args.endpoint)?;
            let payload = read_payload(args)?;
            let result = send_payload(&api, &payload).await?;
            print_json(&result)?;
            Ok(outcome_of(&result))
        }
        Command::Describe { endpoint } => describe(&factory, endpoint),
        Command::Init { .. } => {
            tracing::debug!("Init is handled before configuration is loaded");
            Ok(Outcome::Completed)
        }
    }
}

fn describe<S: ConfigStore>(
    factory: &ApiFactory<ReqwestClient, S>,
    endpoint: &str,
) -> Result<Outcome, RunError> {
    let summary = factory.create(endpoint)?.describe()?;
    print_json(&summary)?;
    Ok(Outcome::Completed)
}

/// Returns the payload text given on the command line or in a file.
fn read_payload(args: &SendArgs) -> Result<String, RunError> {
    match (&args.data, &args.file) {
        (Some(data), _) => Ok(data.clone()),
        (None, Some(path)) => read_payload_file(path),
        // clap requires one of the two
        (None, None) => Ok(String::new()),
    }
}

fn read_payload_file(path: &Path) -> Result<String, RunError> {
    std::fs::read_to_string(path).map_err(|source| RunError::PayloadRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Validates `payload` as JSON and sends it through `sender`.
///
/// The payload is forwarded as given, not re-serialized.
async fn send_payload<A: ErpSender>(
    sender: &A,
    payload: &str,
) -> Result<RequestResult, RunError> {
    serde_json::from_str::<serde_json::Value>(payload)
        .map_err(RunError::InvalidPayload)?;

    let result = sender.send_request(payload).await?;

    match result.errors {
        None => tracing::info!("Request delivered"),
        Some(ref message) if result.is_disabled() => tracing::warn!("{message}"),
        Some(ref message) => tracing::warn!("Request failed: {message}"),
    }

    Ok(result)
}

const fn outcome_of(result: &RequestResult) -> Outcome {
    if result.errors.is_some() {
        Outcome::RequestFailed
    } else {
        Outcome::Completed
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), RunError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)
        .map_err(|e| RunError::Output(e.into()))?;
    writeln!(out).map_err(RunError::Output)
}
