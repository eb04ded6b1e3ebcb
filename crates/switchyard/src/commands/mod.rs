//! Subcommand handlers. `main` routes each top-level command here; only
//! `devices` needs a controller.

pub mod config_cmd;
pub mod devices;
pub mod util;
