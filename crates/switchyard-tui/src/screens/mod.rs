//! Screen implementations. Each screen is a top-level Component.

pub mod device_form;
pub mod devices;

pub use devices::DevicesScreen;
