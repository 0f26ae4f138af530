//! Default values for configuration options.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Default top-level namespace for every configuration key.
pub const NAMESPACE: &str = "erp";

/// Section holding the settings shared by all endpoints.
pub const GENERAL_SECTION: &str = "general";

/// Separator between path segments of a configuration key.
pub const PATH_SEPARATOR: char = '/';

/// Error text returned when a request targets a disabled endpoint.
pub const DISABLED_MESSAGE: &str = "API disabled";

/// Error text used when a failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error has occurred while sending request";

/// Default output path for the `init` subcommand.
pub const CONFIG_FILE: &str = "erp-relay.toml";

/// Content type sent with every request.
pub const CONTENT_TYPE: &str = "application/json";
