// ── API-to-domain type conversions ──
//
// Bridges raw `switchyard_api` wire records into canonical domain types and
// back. Reading is lenient about status spellings and VLAN ids and strict
// about identity; writing always emits the canonical form.

use serde_json::Value;
use tracing::warn;

use switchyard_api::{LinkRecord, PortRecord, SwitchRecord, VlanRecord};

use crate::error::CoreError;
use crate::model::{ConnectedDevice, Device, DeviceId, Port, PortStatus, Vlan, VlanStatus};

// ── Helpers ────────────────────────────────────────────────────────

fn read_port_status(raw: &str) -> PortStatus {
    raw.parse().unwrap_or_else(|_| {
        warn!(status = raw, "unrecognized port status, reading as not-connected");
        PortStatus::NotConnected
    })
}

fn read_vlan_status(raw: &str) -> VlanStatus {
    raw.parse().unwrap_or_else(|_| {
        warn!(status = raw, "unrecognized vlan status, reading as act-unsupported");
        VlanStatus::ActUnsupported
    })
}

/// Id stored for a VLAN whose wire id is missing or unusable.
pub const UNSET_VLAN_ID: u16 = 0;

/// Whole numbers in `0..=65535`, bare or as digit strings, are kept.
/// Anything else (`null`, fractions, negatives, words) reads as
/// [`UNSET_VLAN_ID`].
fn read_vlan_id(raw: &Value) -> u16 {
    let parsed = match raw {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        warn!(id = %raw, "vlan id is not a whole number in 0..=65535, reading as 0");
        UNSET_VLAN_ID
    })
}

// ── Wire → domain ──────────────────────────────────────────────────

impl TryFrom<SwitchRecord> for Device {
    type Error = CoreError;

    fn try_from(r: SwitchRecord) -> Result<Self, Self::Error> {
        let (id, client_ref) = match (r.record_id, r.id) {
            (Some(stored), echoed) => (DeviceId::Stored(stored), echoed),
            (None, Some(id)) => (DeviceId::Stored(id), None),
            (None, None) => {
                return Err(CoreError::MalformedRecord {
                    reason: format!("switch '{}' has neither `_id` nor `id`", r.name),
                });
            }
        };

        Ok(Self {
            id,
            client_ref,
            name: r.name,
            ip: r.ip,
            ports: r.ports.into_iter().map(Port::from).collect(),
            vlans: r.vlans.into_iter().map(Vlan::from).collect(),
        })
    }
}

impl From<PortRecord> for Port {
    fn from(p: PortRecord) -> Self {
        Self {
            status: read_port_status(&p.status),
            port: p.port,
            vlan: p.vlan,
            connected_to: p.connected_to.map(ConnectedDevice::from),
        }
    }
}

impl From<LinkRecord> for ConnectedDevice {
    fn from(l: LinkRecord) -> Self {
        Self {
            device: l.device,
            ip: l.ip,
            port: l.port,
        }
    }
}

impl From<VlanRecord> for Vlan {
    fn from(v: VlanRecord) -> Self {
        Self {
            id: read_vlan_id(&v.id),
            status: read_vlan_status(&v.status),
            name: v.name,
            ports: v.ports,
            ip: v.ip,
        }
    }
}

/// Convert a batch of wire records. A record without identity is skipped
/// with a warning; the rest of the list still loads.
pub fn devices_from_records(records: Vec<SwitchRecord>) -> Vec<Device> {
    records
        .into_iter()
        .filter_map(|r| {
            Device::try_from(r)
                .inspect_err(|e| warn!(error = %e, "skipping unusable switch record"))
                .ok()
        })
        .collect()
}

// ── Domain → wire ──────────────────────────────────────────────────

impl From<&Device> for SwitchRecord {
    fn from(d: &Device) -> Self {
        let (record_id, id) = match &d.id {
            DeviceId::Stored(stored) => (Some(stored.clone()), d.client_ref.clone()),
            DeviceId::Draft(placeholder) => (None, Some(placeholder.to_string())),
        };
        Self {
            record_id,
            id,
            name: d.name.clone(),
            ip: d.ip.clone(),
            ports: d.ports.iter().map(PortRecord::from).collect(),
            vlans: d.vlans.iter().map(VlanRecord::from).collect(),
        }
    }
}

impl From<&Port> for PortRecord {
    fn from(p: &Port) -> Self {
        let link = p.connected_to.clone().unwrap_or_default();
        Self {
            port: p.port.clone(),
            status: p.status.as_str().to_owned(),
            vlan: p.vlan.clone(),
            connected_to: Some(LinkRecord {
                device: link.device,
                ip: link.ip,
                port: link.port,
            }),
        }
    }
}

impl From<&Vlan> for VlanRecord {
    fn from(v: &Vlan) -> Self {
        Self {
            id: Value::from(v.id),
            name: v.name.clone(),
            status: v.status.as_str().to_owned(),
            ports: v.ports.clone(),
            ip: v.ip.clone(),
        }
    }
}
