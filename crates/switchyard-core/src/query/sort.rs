//! Stable single-key ordering for the device table.

use std::borrow::Borrow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::Device;

/// Column the table is ordered by.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortField {
    #[default]
    Name,
    Ip,
}

impl SortField {
    /// The string value compared for this field.
    pub fn key(self, device: &Device) -> &str {
        match self {
            Self::Name => &device.name,
            Self::Ip => &device.ip,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply the direction to an ascending comparison outcome.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Arrow glyph for column headers.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Order `devices` in place by `field`. Equal keys keep their input order
/// in both directions.
pub fn sort_devices<D: Borrow<Device>>(devices: &mut [D], field: SortField, order: SortOrder) {
    devices.sort_by(|a, b| order.apply(field.key(a.borrow()).cmp(field.key(b.borrow()))));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, ip: &str) -> Device {
        let mut d = Device::draft();
        d.name = name.into();
        d.ip = ip.into();
        d
    }

    fn names(list: &[&Device]) -> Vec<String> {
        list.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn ascending_and_descending_by_name() {
        let list = [device("b", ""), device("c", ""), device("a", "")];
        let mut view: Vec<&Device> = list.iter().collect();

        sort_devices(&mut view, SortField::Name, SortOrder::Asc);
        assert_eq!(names(&view), ["a", "b", "c"]);

        sort_devices(&mut view, SortField::Name, SortOrder::Desc);
        assert_eq!(names(&view), ["c", "b", "a"]);
    }

    #[test]
    fn ip_sort_is_lexicographic_not_numeric() {
        let list = [device("x", "10.0.0.9"), device("y", "10.0.0.10")];
        let mut view: Vec<&Device> = list.iter().collect();
        sort_devices(&mut view, SortField::Ip, SortOrder::Asc);
        assert_eq!(names(&view), ["y", "x"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let list = [
            device("first", "10.0.0.1"),
            device("second", "10.0.0.1"),
            device("third", "10.0.0.0"),
        ];
        let mut view: Vec<&Device> = list.iter().collect();
        sort_devices(&mut view, SortField::Ip, SortOrder::Asc);
        assert_eq!(names(&view), ["third", "first", "second"]);

        let mut view: Vec<&Device> = list.iter().collect();
        sort_devices(&mut view, SortField::Ip, SortOrder::Desc);
        assert_eq!(names(&view), ["first", "second", "third"]);
    }

    #[test]
    fn result_is_a_permutation() {
        let mut owned = vec![device("m", "3"), device("a", "1"), device("z", "2")];
        sort_devices(&mut owned, SortField::Ip, SortOrder::Desc);
        let mut got: Vec<String> = owned.iter().map(|d| d.name.clone()).collect();
        got.sort();
        assert_eq!(got, ["a", "m", "z"]);
    }

    #[test]
    fn direction_reverses_every_unequal_comparison() {
        for (a, b) in [("a", "b"), ("10", "9"), ("x", "x")] {
            let asc = SortOrder::Asc.apply(a.cmp(b));
            let desc = SortOrder::Desc.apply(a.cmp(b));
            assert_eq!(asc, desc.reverse());
        }
    }

    #[test]
    fn fields_parse_case_insensitively() {
        assert_eq!("IP".parse::<SortField>().ok(), Some(SortField::Ip));
        assert_eq!(SortField::Name.to_string(), "name");
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
    }
}
