// switchyard-api: Async Rust client for the switch inventory REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::SwitchClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{LinkRecord, PortRecord, SwitchRecord, VlanRecord};
