//! CLI configuration — thin wrapper around `switchyard_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --insecure, --timeout).

use std::time::Duration;

use tracing::debug;

use switchyard_core::{ControllerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use switchyard_config::{
    Config, Profile, config_path, load_config_or_default, parse_api_url, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Sorted, comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Build a `ControllerConfig` from the config file, profile, and CLI flags.
///
/// Flags beat the profile, the profile beats `[defaults]`. Without any
/// profile the built-in API URL is used. Naming a profile with `--profile`
/// that does not exist is an error.
pub fn resolve_controller_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ControllerConfig, CliError> {
    let name = active_profile_name(global, config);
    let profile = match config.profiles.get(&name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            });
        }
        None => {
            debug!(profile = %name, "profile not configured, using built-in defaults");
            Profile::default()
        }
    };

    // 1. Base settings from the profile and [defaults]
    let mut resolved = switchyard_config::profile_to_controller_config(&profile, &config.defaults)?;

    // 2. URL (flag > env > profile)
    if let Some(ref raw) = global.api_url {
        resolved.url = parse_api_url(raw)?;
    }

    // 3. TLS
    if global.insecure {
        resolved.tls = TlsVerification::DangerAcceptInvalid;
    }

    // 4. Timeout
    if let Some(secs) = global.timeout {
        resolved.timeout = Duration::from_secs(secs);
    }

    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["switchyard"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["devices", "list"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn lab_config() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                api_url: "http://10.0.0.5:5000/api".into(),
                timeout: Some(10),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let resolved = resolve_controller_config(&global(&[]), &lab_config()).unwrap();
        assert_eq!(resolved.url.as_str(), "http://10.0.0.5:5000/api");
        assert_eq!(resolved.timeout, Duration::from_secs(10));
        assert_eq!(resolved.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn flags_override_profile() {
        let g = global(&["--api-url", "https://inv.example/api", "-k", "--timeout", "3"]);
        let resolved = resolve_controller_config(&g, &lab_config()).unwrap();
        assert_eq!(resolved.url.as_str(), "https://inv.example/api");
        assert_eq!(resolved.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(resolved.timeout, Duration::from_secs(3));
    }

    #[test]
    fn missing_named_profile_is_an_error() {
        let err = resolve_controller_config(&global(&["-p", "prod"]), &lab_config()).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "default"));
    }

    #[test]
    fn no_config_falls_back_to_builtin_url() {
        let resolved = resolve_controller_config(&global(&[]), &Config::default()).unwrap();
        assert_eq!(resolved.url.as_str(), "http://localhost:5000/api");
    }
}
