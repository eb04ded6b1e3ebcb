// Wire types for the `/switches` resource.
//
// These mirror the JSON the inventory API sends and accepts, with no
// normalization: status fields stay free-form strings, `connected_to`
// may be null, and identity may arrive as `_id`, `id`, or both.
// `switchyard-core` converts them into strict domain types.

use serde::{Deserialize, Serialize};

/// A switch record as stored by the inventory API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchRecord {
    /// Server-assigned identity.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Client-supplied identifier (placeholder until the server assigns `_id`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub ports: Vec<PortRecord>,
    #[serde(default)]
    pub vlans: Vec<VlanRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub vlan: String,
    #[serde(default)]
    pub connected_to: Option<LinkRecord>,
}

/// Far end of a physical link. Empty strings mean "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub port: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VlanRecord {
    /// Kept as raw JSON. Stores written by older clients hold `null` or
    /// strings here; conversion decides what is usable.
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub ports: Vec<String>,
    #[serde(default)]
    pub ip: String,
}
