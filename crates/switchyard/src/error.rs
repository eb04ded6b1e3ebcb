//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use switchyard_config::ConfigError;
use switchyard_core::{CoreError, EditError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the inventory API at {url}")]
    #[diagnostic(
        code(switchyard::connection_failed),
        help(
            "Check that the API is running and reachable.\n\
             Set the URL with --api-url or `switchyard config init`.\n\
             For self-signed certificates try --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(switchyard::timeout),
        help("Increase the timeout with --timeout or check API responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(switchyard::not_found),
        help("Run: switchyard {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(switchyard::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response from the inventory API: {message}")]
    #[diagnostic(
        code(switchyard::malformed),
        help("Re-run with -vv to log the request, and check the API version.")
    )]
    Malformed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(switchyard::validation))]
    Validation { field: String, reason: String },

    #[error("Cannot apply edit '{expr}'")]
    #[diagnostic(
        code(switchyard::edit),
        help("See `switchyard devices create --help` for the edit syntax.")
    )]
    InvalidEdit {
        expr: String,
        #[source]
        source: EditError,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(switchyard::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: switchyard config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(switchyard::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(switchyard::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(switchyard::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML rendering failed: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::InvalidEdit { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound { identifier } => CliError::NotFound {
                resource_type: "device".into(),
                identifier,
                list_command: "devices list".into(),
            },

            CoreError::Api { status, message } => CliError::ApiError { status, message },

            CoreError::MalformedResponse { message } => CliError::Malformed { message },
            CoreError::MalformedRecord { reason } => CliError::Malformed { message: reason },

            CoreError::NotStored { identifier } => CliError::Validation {
                field: "device".into(),
                reason: format!("{identifier} has no stored id yet"),
            },

            CoreError::Edit(source) => CliError::InvalidEdit {
                expr: String::new(),
                source,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::from(CoreError::NotFound {
                identifier: "sw".into()
            })
            .exit_code(),
            exit_code::NOT_FOUND
        );
        assert_eq!(
            CliError::from(CoreError::ConnectionFailed {
                url: "http://localhost:5000/api/switches".into(),
                reason: "refused".into(),
            })
            .exit_code(),
            exit_code::CONNECTION
        );
        assert_eq!(
            CliError::from(CoreError::Api {
                status: 500,
                message: "boom".into()
            })
            .exit_code(),
            exit_code::GENERAL
        );
        assert_eq!(
            CliError::InvalidEdit {
                expr: "vlans.0.id=x".into(),
                source: EditError::InvalidVlanId { input: "x".into() },
            }
            .exit_code(),
            exit_code::USAGE
        );
    }
}
