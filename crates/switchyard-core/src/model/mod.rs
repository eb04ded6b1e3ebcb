// ── Domain model ──
//
// Canonical record types consumed by the query pipeline, the field editor,
// and both front-ends. Wire records live in `switchyard_api::types`;
// `crate::convert` translates between the two.

pub mod device;
pub mod device_id;
pub mod status;

pub use device::{ConnectedDevice, Device, Port, Vlan};
pub use device_id::DeviceId;
pub use status::{PortStatus, UnknownStatus, VlanStatus};
