use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::{Device, DeviceId};
use crate::query::{TablePage, TableView};

use super::DeviceList;

const LOAD_FAILED: &str = "Failed to load devices";
const CREATE_FAILED: &str = "Failed to add device";
const UPDATE_FAILED: &str = "Failed to update device";
const DELETE_FAILED: &str = "Failed to delete device";

/// Everything the console screen renders from.
///
/// Network outcomes are fed in through the `on_*` handlers. Success clears
/// the error and applies the change; failure leaves the list as it was.
#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    pub devices: DeviceList,
    pub view: TableView,
    pub error: Option<String>,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current table page.
    pub fn page(&self) -> TablePage<'_> {
        self.view.project(self.devices.as_slice())
    }

    /// Keep the page in range after the list or the filter changed.
    pub fn clamp_view(&mut self) {
        let total = self.page().total_pages;
        self.view.clamp_page(total);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn on_loaded(&mut self, outcome: Result<Vec<Device>, CoreError>) {
        match outcome {
            Ok(devices) => {
                info!(count = devices.len(), "devices loaded");
                self.devices.replace_all(devices);
                self.error = None;
                self.clamp_view();
            }
            Err(e) => self.fail(LOAD_FAILED, &e),
        }
    }

    pub fn on_created(&mut self, outcome: Result<Device, CoreError>) -> bool {
        match outcome {
            Ok(device) => {
                info!(id = %device.id, name = %device.name, "device created");
                self.devices.add(device);
                self.error = None;
                true
            }
            Err(e) => {
                self.fail(CREATE_FAILED, &e);
                false
            }
        }
    }

    pub fn on_updated(&mut self, outcome: Result<Device, CoreError>) -> bool {
        match outcome {
            Ok(device) => {
                info!(id = %device.id, "device updated");
                if !self.devices.replace(device.clone()) {
                    warn!(id = %device.id, "updated device was not in the list, appending");
                    self.devices.add(device);
                }
                self.error = None;
                true
            }
            Err(e) => {
                self.fail(UPDATE_FAILED, &e);
                false
            }
        }
    }

    pub fn on_deleted(&mut self, id: &DeviceId, outcome: Result<(), CoreError>) -> bool {
        match outcome {
            Ok(()) => {
                info!(%id, "device deleted");
                self.devices.remove(id);
                self.error = None;
                self.clamp_view();
                true
            }
            Err(e) => {
                self.fail(DELETE_FAILED, &e);
                false
            }
        }
    }

    fn fail(&mut self, message: &str, cause: &CoreError) {
        warn!(error = %cause, "{message}");
        self.error = Some(message.to_owned());
    }
}
