// ── Core error types ──
//
// User-facing errors from switchyard-core. Consumers never match on
// reqwest errors directly: the `From<switchyard_api::Error>` impl
// translates transport-layer failures into domain variants.

use thiserror::Error;

use crate::edit::EditError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to inventory API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Inventory API request timed out")]
    Timeout,

    // ── API errors ───────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Device not found: {identifier}")]
    NotFound { identifier: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Malformed response from inventory API: {message}")]
    MalformedResponse { message: String },

    #[error("Malformed device record: {reason}")]
    MalformedRecord { reason: String },

    #[error("Device {identifier} has not been saved yet")]
    NotStored { identifier: String },

    #[error(transparent)]
    Edit(#[from] EditError),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Failed before the API produced any answer.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. } | Self::Timeout)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<switchyard_api::Error> for CoreError {
    fn from(err: switchyard_api::Error) -> Self {
        match err {
            switchyard_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        status: e.status().map_or(0, |s| s.as_u16()),
                        message: e.to_string(),
                    }
                }
            }
            switchyard_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            switchyard_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            switchyard_api::Error::Api { status: 404, message } => {
                CoreError::NotFound { identifier: message }
            }
            switchyard_api::Error::Api { status, message } => CoreError::Api { status, message },
            switchyard_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}
