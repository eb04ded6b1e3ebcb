// ── Assignment syntax ──
//
// `name=SW1`, `ports.0.connected_to.ip=10.0.0.254`, `vlans.1.ports=1,2`,
// plus the structural forms `ports+`, `ports-2`, `vlans+`, `vlans-0`.
// Paths are trimmed; values are taken verbatim.

use std::str::FromStr;

use super::{DeviceEdit, EditError, LinkField, PortField, VlanField};

impl FromStr for DeviceEdit {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((path, value)) = s.split_once('=') else {
            return parse_structural(s.trim());
        };
        let path = path.trim();
        let segments: Vec<&str> = path.split('.').collect();
        let value = value.to_owned();

        match segments.as_slice() {
            ["name"] => Ok(Self::Name(value)),
            ["ip"] => Ok(Self::Ip(value)),
            ["ports", index, rest @ ..] => Ok(Self::Port {
                index: parse_index(path, index)?,
                field: port_field(path, rest, value)?,
            }),
            ["vlans", index, rest @ ..] => Ok(Self::Vlan {
                index: parse_index(path, index)?,
                field: vlan_field(path, rest, value)?,
            }),
            _ => Err(unknown(path)),
        }
    }
}

fn parse_structural(expr: &str) -> Result<DeviceEdit, EditError> {
    match expr {
        "ports+" => return Ok(DeviceEdit::AddPort),
        "vlans+" => return Ok(DeviceEdit::AddVlan),
        _ => {}
    }
    if let Some(index) = expr.strip_prefix("ports-") {
        return Ok(DeviceEdit::RemovePort(parse_index(expr, index)?));
    }
    if let Some(index) = expr.strip_prefix("vlans-") {
        return Ok(DeviceEdit::RemoveVlan(parse_index(expr, index)?));
    }
    Err(EditError::InvalidValue {
        path: expr.to_owned(),
        reason: "expected FIELD=VALUE, ports+, ports-N, vlans+ or vlans-N".into(),
    })
}

fn port_field(path: &str, rest: &[&str], value: String) -> Result<PortField, EditError> {
    match rest {
        ["port" | "label"] => Ok(PortField::Label(value)),
        ["status"] => value
            .parse()
            .map(PortField::Status)
            .map_err(|_| invalid(path, "expected connected, not-connected or disabled")),
        ["vlan"] => Ok(PortField::Vlan(value)),
        ["connected_to", "device"] => Ok(PortField::Link(LinkField::Device(value))),
        ["connected_to", "ip"] => Ok(PortField::Link(LinkField::Ip(value))),
        ["connected_to", "port"] => Ok(PortField::Link(LinkField::Port(value))),
        _ => Err(unknown(path)),
    }
}

fn vlan_field(path: &str, rest: &[&str], value: String) -> Result<VlanField, EditError> {
    match rest {
        ["id"] => Ok(VlanField::Id(value)),
        ["name"] => Ok(VlanField::Name(value)),
        ["status"] => value
            .parse()
            .map(VlanField::Status)
            .map_err(|_| invalid(path, "expected active, act-unsupported or error")),
        ["ports"] => Ok(VlanField::Ports(value)),
        ["ip"] => Ok(VlanField::Ip(value)),
        _ => Err(unknown(path)),
    }
}

fn parse_index(path: &str, raw: &str) -> Result<usize, EditError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(path, "index must be a non-negative integer"))
}

fn unknown(path: &str) -> EditError {
    EditError::UnknownField {
        path: path.to_owned(),
    }
}

fn invalid(path: &str, reason: &str) -> EditError {
    EditError::InvalidValue {
        path: path.to_owned(),
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{PortStatus, VlanStatus};

    fn parse(s: &str) -> Result<DeviceEdit, EditError> {
        s.parse()
    }

    #[test]
    fn top_level_fields() {
        assert_eq!(parse("name=Core SW").unwrap(), DeviceEdit::Name("Core SW".into()));
        assert_eq!(parse(" ip =10.0.0.1").unwrap(), DeviceEdit::Ip("10.0.0.1".into()));
        assert_eq!(parse("name=").unwrap(), DeviceEdit::Name(String::new()));
    }

    #[test]
    fn nested_port_fields() {
        assert_eq!(
            parse("ports.2.connected_to.ip=10.0.0.254").unwrap(),
            DeviceEdit::Port {
                index: 2,
                field: PortField::Link(LinkField::Ip("10.0.0.254".into())),
            }
        );
        assert_eq!(
            parse("ports.0.status=Not Connected").unwrap(),
            DeviceEdit::Port {
                index: 0,
                field: PortField::Status(PortStatus::NotConnected),
            }
        );
    }

    #[test]
    fn nested_vlan_fields_keep_raw_text() {
        assert_eq!(
            parse("vlans.0.ports=1,2, 3").unwrap(),
            DeviceEdit::Vlan {
                index: 0,
                field: VlanField::Ports("1,2, 3".into()),
            }
        );
        assert_eq!(
            parse("vlans.1.status=act-unsupported").unwrap(),
            DeviceEdit::Vlan {
                index: 1,
                field: VlanField::Status(VlanStatus::ActUnsupported),
            }
        );
        // Value containing '=' is kept whole.
        assert_eq!(
            parse("vlans.0.name=a=b").unwrap(),
            DeviceEdit::Vlan {
                index: 0,
                field: VlanField::Name("a=b".into()),
            }
        );
    }

    #[test]
    fn structural_forms() {
        assert_eq!(parse("ports+").unwrap(), DeviceEdit::AddPort);
        assert_eq!(parse("vlans+").unwrap(), DeviceEdit::AddVlan);
        assert_eq!(parse("ports-3").unwrap(), DeviceEdit::RemovePort(3));
        assert_eq!(parse("vlans-0").unwrap(), DeviceEdit::RemoveVlan(0));
    }

    #[test]
    fn rejects_unknown_paths_and_bad_values() {
        assert!(matches!(parse("hostname=x"), Err(EditError::UnknownField { .. })));
        assert!(matches!(parse("ports.0.speed=1G"), Err(EditError::UnknownField { .. })));
        assert!(matches!(parse("ports.x.vlan=1"), Err(EditError::InvalidValue { .. })));
        assert!(matches!(parse("ports.0.status=up"), Err(EditError::InvalidValue { .. })));
        assert!(matches!(parse("vlans-"), Err(EditError::InvalidValue { .. })));
        assert!(matches!(parse("bogus"), Err(EditError::InvalidValue { .. })));
    }
}
