// ── Runtime connection configuration ──
//
// Describes *where* the inventory API lives and how to talk to it. Built
// by the CLI/TUI from a profile and handed to `Controller`; core never
// reads config files.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Default API base when no profile or flag says otherwise.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed lab servers).
    DangerAcceptInvalid,
}

/// Configuration for one inventory API endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// API base URL; `switches` is resolved relative to it.
    pub url: Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl ControllerConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_API_URL)
                .unwrap_or_else(|_| unreachable!("DEFAULT_API_URL parses")),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_api() {
        let config = ControllerConfig::default();
        assert_eq!(config.url.as_str(), "http://localhost:5000/api");
        assert_eq!(config.tls, TlsVerification::SystemDefaults);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
