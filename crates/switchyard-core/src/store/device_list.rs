use crate::model::{Device, DeviceId};

/// Ordered device collection. Order is insertion order; removal keeps the
/// relative order of everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceList {
    devices: Vec<Device>,
}

impl DeviceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, devices: Vec<Device>) {
        self.devices = devices;
    }

    pub fn add(&mut self, device: Device) {
        self.devices.push(device);
    }

    /// Swap in `device` at the position of the record with the same id.
    pub fn replace(&mut self, device: Device) -> bool {
        match self.devices.iter_mut().find(|d| d.id == device.id) {
            Some(slot) => {
                *slot = device;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &DeviceId) -> Option<Device> {
        let index = self.position(id)?;
        Some(self.devices.remove(index))
    }

    pub fn get(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| &d.id == id)
    }

    pub fn position(&self, id: &DeviceId) -> Option<usize> {
        self.devices.iter().position(|d| &d.id == id)
    }

    /// Look up by stored id, draft id, or exact name, in that order.
    pub fn find(&self, key: &str) -> Option<&Device> {
        self.devices
            .iter()
            .find(|d| d.id.to_string() == key)
            .or_else(|| self.devices.iter().find(|d| d.name == key))
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn as_slice(&self) -> &[Device] {
        &self.devices
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Device> {
        self.devices.iter()
    }
}

impl From<Vec<Device>> for DeviceList {
    fn from(devices: Vec<Device>) -> Self {
        Self { devices }
    }
}

impl<'a> IntoIterator for &'a DeviceList {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
