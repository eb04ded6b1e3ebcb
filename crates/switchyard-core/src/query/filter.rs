//! Free-text device search.
//!
//! A device matches when any of these holds, compared case-insensitively:
//! the name contains the query, the IP contains the query, some port's
//! far-end device name contains the query, or some VLAN id equals the
//! query read as a number. VLAN ids are never substring-matched.

use crate::model::Device;

/// A query prepared once and tested against many devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    folded: String,
    vlan_id: Option<u64>,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            folded: raw.to_lowercase(),
            vlan_id: raw.trim().parse().ok(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn matches(&self, device: &Device) -> bool {
        self.is_empty()
            || contains_folded(&device.name, &self.folded)
            || contains_folded(&device.ip, &self.folded)
            || device.ports.iter().any(|p| {
                p.connected_to
                    .as_ref()
                    .is_some_and(|c| contains_folded(&c.device, &self.folded))
            })
            || self
                .vlan_id
                .is_some_and(|id| device.vlans.iter().any(|v| u64::from(v.id) == id))
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

/// One-off match of a single device.
pub fn matches(device: &Device, query: &str) -> bool {
    SearchQuery::new(query).matches(device)
}

/// Devices matching `query`, in input order.
pub fn filter_devices<'a>(devices: &'a [Device], query: &str) -> Vec<&'a Device> {
    let query = SearchQuery::new(query);
    devices.iter().filter(|d| query.matches(d)).collect()
}
