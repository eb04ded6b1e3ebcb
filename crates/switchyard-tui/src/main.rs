//! `switchyard-tui` — interactive terminal console for a switch inventory.
//!
//! Built on [ratatui](https://ratatui.rs). The device table supports live
//! search, sorting by name or IP and paging; devices are created and edited
//! in a modal form and deleted after confirmation.
//!
//! Logs are written to a file (default `/tmp/switchyard-tui.log`) to avoid
//! corrupting the terminal UI. Every API call runs as a background task that
//! reports its outcome back into the action loop.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use switchyard_core::{Controller, ControllerConfig, TlsVerification};

use crate::app::App;

/// Terminal console for a network switch inventory.
#[derive(Parser, Debug)]
#[command(name = "switchyard-tui", version, about)]
struct Cli {
    /// Inventory API base URL (e.g., http://localhost:5000/api)
    #[arg(short = 'u', long, env = "SWITCHYARD_API_URL")]
    api_url: Option<String>,

    /// Configuration profile to use
    #[arg(short = 'p', long, env = "SWITCHYARD_PROFILE")]
    profile: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Log file path (defaults to /tmp/switchyard-tui.log)
    #[arg(long, default_value = "/tmp/switchyard-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may be logged to stdout/stderr while
/// the terminal is in raw mode. The returned guard flushes on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "switchyard_tui={log_level},switchyard_core={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("switchyard-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the controller configuration.
///
/// Priority: `--api-url` > selected profile > built-in default URL.
fn controller_config(cli: &Cli) -> Result<ControllerConfig> {
    let cfg = switchyard_config::load_config_or_default();

    let mut config = match cfg.profile(cli.profile.as_deref()) {
        Some((name, profile)) => {
            info!(profile = name, "using configuration profile");
            switchyard_config::profile_to_controller_config(profile, &cfg.defaults)?
        }
        None => ControllerConfig {
            timeout: Duration::from_secs(cfg.defaults.timeout),
            ..ControllerConfig::default()
        },
    };

    if let Some(ref raw) = cli.api_url {
        config.url = switchyard_config::parse_api_url(raw)?;
    }
    if cli.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks(&cli.log_file)?;

    let _log_guard = setup_tracing(&cli);

    let config = controller_config(&cli)?;
    info!(url = %config.url, "starting switchyard-tui");

    let controller = Controller::new(config).wrap_err("could not build the API client")?;
    let mut app = App::new(controller);
    app.run().await?;

    Ok(())
}
