//! erp-relay: ERP outbound request client
//!
//! Entry point for the erp-relay application.

use erp_relay::config::{Cli, Command, ErpConfig, load_store, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Command::Init { output } = &cli.command {
        return handle_init(output);
    }

    setup_tracing(cli.verbose);

    let store = match load_store(&cli) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    let settings = ErpConfig::new(&store)
        .with_namespace(cli.namespace.as_str())
        .snapshot();
    tracing::info!("{settings}");

    run_application(&cli, store)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs the requested command with the loaded configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(cli: &Cli, store: erp_relay::config::CliStore) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(&cli.command, store, &cli.namespace)) {
        Ok(run::Outcome::Completed) => exit_code::SUCCESS,
        Ok(run::Outcome::RequestFailed) => exit_code::runtime_error(),
        Err(e) if e.is_config_error() => {
            tracing::error!("Configuration error: {e}");
            exit_code::CONFIG_ERROR
        }
        Err(e) => {
            tracing::error!("Application error: {e}");
            exit_code::runtime_error()
        }
    }
}
