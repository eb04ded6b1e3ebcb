//! Nested field editor.
//!
//! Every change to a device is a [`DeviceEdit`] value: a closed set of
//! tagged variants per field group rather than string-keyed access.
//! [`apply`] returns a new record and never touches its input, so a form
//! can discard its working copy at any point.

mod parse;

use thiserror::Error;

use crate::model::{ConnectedDevice, Device, Port, PortStatus, Vlan, VlanStatus};

/// Lowest and highest usable 802.1Q VLAN ids.
pub const VLAN_ID_RANGE: std::ops::RangeInclusive<u16> = 1..=4094;

// ── Edit variants ────────────────────────────────────────────────────

/// Sub-field of a port's `connected_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkField {
    Device(String),
    Ip(String),
    Port(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortField {
    Label(String),
    Status(PortStatus),
    Vlan(String),
    Link(LinkField),
}

/// `Id` and `Ports` carry raw form text; the editor coerces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VlanField {
    Id(String),
    Name(String),
    Status(VlanStatus),
    Ports(String),
    Ip(String),
}

/// A single change to a device record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEdit {
    Name(String),
    Ip(String),
    Port { index: usize, field: PortField },
    Vlan { index: usize, field: VlanField },
    AddPort,
    RemovePort(usize),
    AddVlan,
    RemoveVlan(usize),
}

// ── Errors ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("{collection} index {index} is out of range (have {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    #[error("'{input}' is not a valid VLAN id (expected 1-4094)")]
    InvalidVlanId { input: String },

    #[error("unknown field '{path}'")]
    UnknownField { path: String },

    #[error("invalid value for '{path}': {reason}")]
    InvalidValue { path: String, reason: String },
}

// ── Applying edits ───────────────────────────────────────────────────

/// New record with `edit` applied. On error the caller keeps `device`.
pub fn apply(device: &Device, edit: DeviceEdit) -> Result<Device, EditError> {
    let mut next = device.clone();
    match edit {
        DeviceEdit::Name(name) => next.name = name,
        DeviceEdit::Ip(ip) => next.ip = ip,
        DeviceEdit::Port { index, field } => {
            let port = slot(&mut next.ports, "ports", index)?;
            apply_port_field(port, field);
        }
        DeviceEdit::Vlan { index, field } => {
            let vlan = slot(&mut next.vlans, "vlans", index)?;
            apply_vlan_field(vlan, field)?;
        }
        DeviceEdit::AddPort => next.ports.push(Port::blank()),
        DeviceEdit::AddVlan => next.vlans.push(Vlan::blank()),
        DeviceEdit::RemovePort(index) => {
            slot(&mut next.ports, "ports", index)?;
            next.ports.remove(index);
        }
        DeviceEdit::RemoveVlan(index) => {
            slot(&mut next.vlans, "vlans", index)?;
            next.vlans.remove(index);
        }
    }
    Ok(next)
}

impl Device {
    /// Method form of [`apply`].
    pub fn edited(&self, edit: DeviceEdit) -> Result<Self, EditError> {
        apply(self, edit)
    }
}

fn slot<'a, T>(
    items: &'a mut [T],
    collection: &'static str,
    index: usize,
) -> Result<&'a mut T, EditError> {
    let len = items.len();
    items.get_mut(index).ok_or(EditError::IndexOutOfRange {
        collection,
        index,
        len,
    })
}

fn apply_port_field(port: &mut Port, field: PortField) {
    match field {
        PortField::Label(label) => port.port = label,
        PortField::Status(status) => port.status = status,
        PortField::Vlan(vlan) => port.vlan = vlan,
        PortField::Link(link) => {
            let target = ensure_link(port);
            match link {
                LinkField::Device(v) => target.device = v,
                LinkField::Ip(v) => target.ip = v,
                LinkField::Port(v) => target.port = v,
            }
        }
    }
}

fn apply_vlan_field(vlan: &mut Vlan, field: VlanField) -> Result<(), EditError> {
    match field {
        VlanField::Id(raw) => vlan.id = parse_vlan_id(&raw)?,
        VlanField::Name(name) => vlan.name = name,
        VlanField::Status(status) => vlan.status = status,
        VlanField::Ports(raw) => vlan.ports = split_port_list(&raw),
        VlanField::Ip(ip) => vlan.ip = ip,
    }
    Ok(())
}

/// The port's connection, materialized as all-empty if absent.
pub fn ensure_link(port: &mut Port) -> &mut ConnectedDevice {
    port.connected_to.get_or_insert_with(ConnectedDevice::default)
}

/// Trimmed decimal text in `1..=4094`.
pub fn parse_vlan_id(raw: &str) -> Result<u16, EditError> {
    raw.trim()
        .parse::<u16>()
        .ok()
        .filter(|id| VLAN_ID_RANGE.contains(id))
        .ok_or_else(|| EditError::InvalidVlanId {
            input: raw.to_owned(),
        })
}

/// Comma-separated labels, each trimmed. Empty segments are kept.
pub fn split_port_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_owned()).collect()
}

/// Inverse of [`split_port_list`] for display in a text field.
pub fn join_port_list(ports: &[String]) -> String {
    ports.join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Device {
        let mut d = Device::draft();
        d.name = "SW1".into();
        d.ip = "10.0.0.1".into();
        d.ports = vec![
            Port {
                port: "Gi1/0/1".into(),
                connected_to: None,
                ..Port::blank()
            },
            Port {
                port: "Gi1/0/2".into(),
                ..Port::blank()
            },
        ];
        d.vlans = vec![Vlan {
            id: 10,
            name: "users".into(),
            ..Vlan::blank()
        }];
        d
    }

    #[test]
    fn editing_returns_new_record_and_leaves_input() {
        let original = sample();
        let next = apply(&original, DeviceEdit::Name("SW1-renamed".into())).unwrap();
        assert_eq!(original.name, "SW1");
        assert_eq!(next.name, "SW1-renamed");
        assert_eq!(next.id, original.id);
    }

    #[test]
    fn link_edit_materializes_missing_connection() {
        let original = sample();
        let next = apply(
            &original,
            DeviceEdit::Port {
                index: 0,
                field: PortField::Link(LinkField::Ip("10.0.0.254".into())),
            },
        )
        .unwrap();
        assert_eq!(
            next.ports[0].connected_to,
            Some(ConnectedDevice {
                device: String::new(),
                ip: "10.0.0.254".into(),
                port: String::new(),
            })
        );
        assert_eq!(original.ports[0].connected_to, None);
    }

    #[test]
    fn only_the_targeted_field_changes() {
        let original = sample();
        let next = apply(
            &original,
            DeviceEdit::Port {
                index: 1,
                field: PortField::Status(PortStatus::Disabled),
            },
        )
        .unwrap();
        assert_eq!(next.ports[0], original.ports[0]);
        assert_eq!(next.ports[1].status, PortStatus::Disabled);
        assert_eq!(next.ports[1].port, original.ports[1].port);
        assert_eq!(next.vlans, original.vlans);
    }

    #[test]
    fn same_edit_twice_equals_once() {
        let original = sample();
        let edits = [
            DeviceEdit::Ip("10.9.9.9".into()),
            DeviceEdit::Vlan {
                index: 0,
                field: VlanField::Ports("1, 2,3".into()),
            },
            DeviceEdit::Vlan {
                index: 0,
                field: VlanField::Id("20".into()),
            },
            DeviceEdit::Port {
                index: 0,
                field: PortField::Link(LinkField::Device("core".into())),
            },
        ];
        for edit in edits {
            let once = apply(&original, edit.clone()).unwrap();
            let twice = apply(&once, edit).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn bad_vlan_id_is_rejected() {
        let original = sample();
        for raw in ["abc", "", "0", "4095", "-3", "1.5"] {
            let err = apply(
                &original,
                DeviceEdit::Vlan {
                    index: 0,
                    field: VlanField::Id(raw.into()),
                },
            )
            .unwrap_err();
            assert_eq!(err, EditError::InvalidVlanId { input: raw.into() });
        }
        assert_eq!(parse_vlan_id(" 42 ").unwrap(), 42);
    }

    #[test]
    fn port_list_keeps_empty_segments() {
        assert_eq!(split_port_list(""), vec![String::new()]);
        assert_eq!(split_port_list("1, ,2"), vec!["1", "", "2"]);
        assert_eq!(split_port_list(" Gi1/0/1 ,Gi1/0/2"), vec!["Gi1/0/1", "Gi1/0/2"]);
        assert_eq!(join_port_list(&split_port_list("a,b")), "a, b");
    }

    #[test]
    fn add_and_remove_preserve_order() {
        let original = sample();
        let grown = apply(&original, DeviceEdit::AddPort).unwrap();
        assert_eq!(grown.ports.len(), 3);
        assert_eq!(grown.ports[2], Port::blank());

        let shrunk = apply(&grown, DeviceEdit::RemovePort(0)).unwrap();
        let labels: Vec<&str> = shrunk.ports.iter().map(|p| p.port.as_str()).collect();
        assert_eq!(labels, vec!["Gi1/0/2", ""]);

        let with_vlan = apply(&original, DeviceEdit::AddVlan).unwrap();
        assert_eq!(with_vlan.vlans[1], Vlan::blank());
        let without = apply(&with_vlan, DeviceEdit::RemoveVlan(0)).unwrap();
        assert_eq!(without.vlans, vec![Vlan::blank()]);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let original = sample();
        let err = apply(&original, DeviceEdit::RemoveVlan(5)).unwrap_err();
        assert_eq!(
            err,
            EditError::IndexOutOfRange {
                collection: "vlans",
                index: 5,
                len: 1
            }
        );
        assert!(apply(
            &original,
            DeviceEdit::Port {
                index: 2,
                field: PortField::Vlan("10".into())
            }
        )
        .is_err());
    }
}
