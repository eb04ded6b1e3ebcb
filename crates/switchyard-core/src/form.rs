// ── Device form working copy ──
//
// Holds the in-progress record between edits. The original stays in the
// store untouched until a submit succeeds; cancelling is dropping the form.

use tracing::debug;

use crate::edit::{self, DeviceEdit};
use crate::model::Device;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone)]
pub struct DeviceForm {
    mode: FormMode,
    working: Device,
    saving: bool,
    error: Option<String>,
}

impl DeviceForm {
    /// Blank form for a new device.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            working: Device::draft(),
            saving: false,
            error: None,
        }
    }

    /// Form over a copy of an existing device.
    pub fn edit(device: &Device) -> Self {
        Self {
            mode: FormMode::Edit,
            working: device.clone(),
            saving: false,
            error: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn working(&self) -> &Device {
        &self.working
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply one edit to the working copy. A rejected edit leaves the copy
    /// as it was and records the message for display.
    pub fn apply(&mut self, edit: DeviceEdit) -> bool {
        match edit::apply(&self.working, edit) {
            Ok(next) => {
                self.working = next;
                self.error = None;
                true
            }
            Err(e) => {
                debug!(error = %e, "edit rejected");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Record to send, or `None` while a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<Device> {
        if self.saving {
            return None;
        }
        self.saving = true;
        self.error = None;
        Some(self.working.clone())
    }

    /// Settle an in-flight submission. On failure the form stays open.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) {
        self.saving = false;
        if let Err(message) = outcome {
            self.error = Some(message);
        }
    }
}
