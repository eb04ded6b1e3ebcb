// ── Device domain types ──

use serde::Serialize;

use super::device_id::DeviceId;
use super::status::{PortStatus, VlanStatus};

/// A managed network switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: DeviceId,
    /// Non-identity `id` echoed back by the store alongside `_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ref: Option<String>,
    pub name: String,
    pub ip: String,
    pub ports: Vec<Port>,
    pub vlans: Vec<Vlan>,
}

impl Device {
    /// Empty record with a fresh placeholder identity.
    pub fn draft() -> Self {
        Self {
            id: DeviceId::draft(),
            client_ref: None,
            name: String::new(),
            ip: String::new(),
            ports: Vec::new(),
            vlans: Vec::new(),
        }
    }

    /// `"device ip"` for every port with a known far end, in port order.
    pub fn connections(&self) -> impl Iterator<Item = String> + '_ {
        self.ports
            .iter()
            .filter_map(|p| p.connected_to.as_ref())
            .filter(|c| !c.is_empty())
            .map(|c| format!("{} {}", c.device, c.ip).trim().to_owned())
    }

    pub fn vlan_ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.vlans.iter().map(|v| v.id)
    }
}

/// Physical interface on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    /// Interface label, e.g. `Gi1/0/1`.
    pub port: String,
    pub status: PortStatus,
    /// Access VLAN label; empty when untagged.
    pub vlan: String,
    pub connected_to: Option<ConnectedDevice>,
}

impl Port {
    /// The row the add-port action inserts.
    pub fn blank() -> Self {
        Self {
            port: String::new(),
            status: PortStatus::Connected,
            vlan: String::new(),
            connected_to: Some(ConnectedDevice::default()),
        }
    }
}

/// Far end of a physical link. Empty fields mean "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectedDevice {
    pub device: String,
    pub ip: String,
    pub port: String,
}

impl ConnectedDevice {
    pub fn is_empty(&self) -> bool {
        self.device.is_empty() && self.ip.is_empty() && self.port.is_empty()
    }
}

/// Virtual LAN scoped to one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vlan {
    pub id: u16,
    pub name: String,
    pub status: VlanStatus,
    /// Member port labels. Informational only.
    pub ports: Vec<String>,
    /// VLAN interface address; empty when none.
    pub ip: String,
}

impl Vlan {
    /// The row the add-VLAN action inserts.
    pub fn blank() -> Self {
        Self {
            id: 1,
            name: String::new(),
            status: VlanStatus::Active,
            ports: Vec::new(),
            ip: String::new(),
        }
    }
}
