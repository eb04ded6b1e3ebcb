//! Clap derive structures for the `switchyard` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of workspace crates so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// switchyard -- manage a network switch inventory
#[derive(Debug, Parser)]
#[command(
    name = "switchyard",
    version,
    about = "Manage a network switch inventory from the command line",
    long_about = "Lists, inspects, creates, edits and deletes switch records held by\n\
        an inventory REST API. Filtering, sorting and paging happen locally\n\
        on the full device list.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "SWITCHYARD_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Inventory API base URL (overrides profile)
    #[arg(long, short = 'u', env = "SWITCHYARD_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SWITCHYARD_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SWITCHYARD_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SWITCHYARD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, inspect and modify switch records
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices (search, sort, one page at a time)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one device with its ports and VLANs
    Get {
        /// Device ID or exact name
        device: String,
    },

    /// Create a device
    #[command(
        after_help = "Edit expressions (--set, repeatable, applied in order):\n  \
            name=VALUE  ip=VALUE\n  \
            ports+  ports-N  vlans+  vlans-N\n  \
            ports.N.port=  ports.N.status=connected|not-connected|disabled  ports.N.vlan=\n  \
            ports.N.connected_to.device=  ports.N.connected_to.ip=  ports.N.connected_to.port=\n  \
            vlans.N.id=1-4094  vlans.N.name=  vlans.N.status=active|act-unsupported|error\n  \
            vlans.N.ports=A,B,C  vlans.N.ip="
    )]
    Create(CreateArgs),

    /// Edit a device by applying field edits and saving the full record
    Edit {
        /// Device ID or exact name
        device: String,

        /// Edit expression (see `devices create --help`)
        #[arg(long = "set", short = 's', value_name = "EXPR", required = true)]
        set: Vec<String>,
    },

    /// Delete a device
    #[command(alias = "rm")]
    Delete {
        /// Device ID or exact name
        device: String,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Free-text search over name, IP, linked device, or exact VLAN id
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Sort column
    #[arg(long, default_value = "name")]
    pub sort: SortKey,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page to show (1-based, clamped to the last page)
    #[arg(long, short = 'P', default_value = "1")]
    pub page: usize,

    /// Show every matching device on one page
    #[arg(long, short = 'a', conflicts_with = "page")]
    pub all: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Name,
    Ip,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Device name
    #[arg(long)]
    pub name: Option<String>,

    /// Management IP address
    #[arg(long)]
    pub ip: Option<String>,

    /// Start from a JSON switch record instead of an empty device
    #[arg(long, short = 'F', value_name = "FILE")]
    pub from_file: Option<PathBuf>,

    /// Edit expression applied after --name/--ip
    #[arg(long = "set", short = 's', value_name = "EXPR")]
    pub set: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    #[command(alias = "use")]
    SetDefault {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
