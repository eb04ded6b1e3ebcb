// ── Port and VLAN status enums ──
//
// Canonical spellings are kebab-case. Parsing is case-insensitive and
// accepts the legacy spellings older records were written with.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, IntoStaticStr};

/// Rejected status text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);

/// Link state of a physical port.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PortStatus {
    #[default]
    Connected,
    NotConnected,
    Disabled,
}

impl PortStatus {
    pub const ALL: [Self; 3] = [Self::Connected, Self::NotConnected, Self::Disabled];

    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Next status in display order, wrapping.
    pub fn next(self) -> Self {
        match self {
            Self::Connected => Self::NotConnected,
            Self::NotConnected => Self::Disabled,
            Self::Disabled => Self::Connected,
        }
    }

    /// Previous status in display order, wrapping.
    pub fn prev(self) -> Self {
        match self {
            Self::Connected => Self::Disabled,
            Self::NotConnected => Self::Connected,
            Self::Disabled => Self::NotConnected,
        }
    }
}

impl FromStr for PortStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold(s);
        match folded.as_str() {
            "connected" => Ok(Self::Connected),
            "not-connected" => Ok(Self::NotConnected),
            "disabled" | "disable" => Ok(Self::Disabled),
            _ => Err(UnknownStatus(s.to_owned())),
        }
    }
}

/// Operational state of a VLAN.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VlanStatus {
    #[default]
    Active,
    /// Configured but not supported by the active hardware profile.
    ActUnsupported,
    Error,
}

impl VlanStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::ActUnsupported, Self::Error];

    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn next(self) -> Self {
        match self {
            Self::Active => Self::ActUnsupported,
            Self::ActUnsupported => Self::Error,
            Self::Error => Self::Active,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Active => Self::Error,
            Self::ActUnsupported => Self::Active,
            Self::Error => Self::ActUnsupported,
        }
    }
}

impl FromStr for VlanStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold(s);
        match folded.as_str() {
            "active" => Ok(Self::Active),
            "act-unsupported" | "act-unsup" | "inactive" => Ok(Self::ActUnsupported),
            "error" => Ok(Self::Error),
            _ => Err(UnknownStatus(s.to_owned())),
        }
    }
}

/// Lowercase, trimmed, with spaces, underscores and slashes folded to `-`.
fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' | '/' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
