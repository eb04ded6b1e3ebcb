// ── Device identity ──
//
// The store assigns identity on creation. Until then a record carries a
// client-side placeholder that is never sent as an address.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Identity of a [`Device`](super::Device).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum DeviceId {
    /// Assigned by the store. The only addressable form.
    Stored(String),
    /// Client placeholder for a record that has not been created yet.
    Draft(Uuid),
}

impl DeviceId {
    /// Fresh placeholder identity.
    pub fn draft() -> Self {
        Self::Draft(Uuid::new_v4())
    }

    /// The store-assigned id, if this record has been persisted.
    pub fn as_stored(&self) -> Option<&str> {
        match self {
            Self::Stored(s) => Some(s),
            Self::Draft(_) => None,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft(_))
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored(s) => write!(f, "{s}"),
            Self::Draft(u) => write!(f, "{u}"),
        }
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self::Stored(s)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self::Stored(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drafts_are_unique_and_not_addressable() {
        let a = DeviceId::draft();
        let b = DeviceId::draft();
        assert_ne!(a, b);
        assert!(a.is_draft());
        assert_eq!(a.as_stored(), None);
    }

    #[test]
    fn stored_id_displays_verbatim() {
        let id = DeviceId::from("65a1f0c2");
        assert_eq!(id.as_stored(), Some("65a1f0c2"));
        assert_eq!(id.to_string(), "65a1f0c2");
    }
}
