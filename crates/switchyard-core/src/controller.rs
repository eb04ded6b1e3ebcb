// ── Controller abstraction ──
//
// Facade over the inventory API. Translates between wire records and
// domain devices and maps transport failures into `CoreError`. Holds no
// device state: the caller's `ConsoleState` owns the list.

use std::sync::Arc;

use tracing::{debug, info};

use switchyard_api::transport::{TlsMode, TransportConfig};
use switchyard_api::{SwitchClient, SwitchRecord};

use crate::config::{ControllerConfig, TlsVerification};
use crate::convert::devices_from_records;
use crate::error::CoreError;
use crate::model::{Device, DeviceId};
use crate::store::DeviceList;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`, so network calls can be
/// moved into spawned tasks.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    client: SwitchClient,
}

impl Controller {
    /// Build the HTTP client for `config`. Does not contact the API.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = SwitchClient::new(config.url.as_str(), &transport)?;
        Ok(Self {
            inner: Arc::new(ControllerInner { config, client }),
        })
    }

    /// Wrap an already-built client.
    pub fn from_client(client: SwitchClient) -> Self {
        let config = ControllerConfig::new(client.base_url().clone());
        Self {
            inner: Arc::new(ControllerInner { config, client }),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Full device list, in store order.
    pub async fn fetch_devices(&self) -> Result<Vec<Device>, CoreError> {
        debug!(url = %self.inner.config.url, "fetching devices");
        let records = self.inner.client.list_switches().await?;
        let devices = devices_from_records(records);
        debug!(count = devices.len(), "fetched devices");
        Ok(devices)
    }

    /// Fetch the list and pick one device by id or exact name.
    pub async fn resolve_device(&self, key: &str) -> Result<Device, CoreError> {
        let list = DeviceList::from(self.fetch_devices().await?);
        list.find(key).cloned().ok_or_else(|| CoreError::NotFound {
            identifier: key.to_owned(),
        })
    }

    // ── Writes ───────────────────────────────────────────────────

    /// Create `device`; returns the stored record with its assigned id.
    pub async fn create_device(&self, device: &Device) -> Result<Device, CoreError> {
        info!(name = %device.name, "creating device");
        let stored = self
            .inner
            .client
            .create_switch(&SwitchRecord::from(device))
            .await?;
        Device::try_from(stored)
    }

    /// Replace the stored record with `device`. Last write wins.
    pub async fn update_device(&self, device: &Device) -> Result<Device, CoreError> {
        let id = stored_id(&device.id)?;
        info!(id, name = %device.name, "updating device");
        let stored = self
            .inner
            .client
            .update_switch(id, &SwitchRecord::from(device))
            .await?;
        Device::try_from(stored)
    }

    pub async fn delete_device(&self, id: &DeviceId) -> Result<(), CoreError> {
        let id = stored_id(id)?;
        info!(id, "deleting device");
        self.inner.client.delete_switch(id).await?;
        Ok(())
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn stored_id(id: &DeviceId) -> Result<&str, CoreError> {
    id.as_stored().ok_or_else(|| CoreError::NotStored {
        identifier: id.to_string(),
    })
}

fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn drafts_are_not_addressable() {
        let err = stored_id(&DeviceId::draft()).unwrap_err();
        assert!(matches!(err, CoreError::NotStored { .. }));
        assert_eq!(stored_id(&DeviceId::from("abc")).ok(), Some("abc"));
    }

    #[test]
    fn tls_modes_map_one_to_one() {
        assert!(matches!(
            tls_to_transport(&TlsVerification::DangerAcceptInvalid),
            TlsMode::DangerAcceptInvalid
        ));
        assert!(matches!(
            tls_to_transport(&TlsVerification::SystemDefaults),
            TlsMode::System
        ));
    }
}
