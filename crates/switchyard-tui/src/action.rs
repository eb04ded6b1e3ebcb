//! All possible UI actions. Actions are the sole mechanism for state mutation.
//!
//! Requests (`Reload`, `Submit`, `Delete`) are turned into background tasks
//! by the app; each task answers with exactly one outcome action.

use switchyard_core::{CoreError, Device, DeviceId, FormMode};

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    ToggleHelp,

    // ── Requests ──────────────────────────────────────────────────
    Reload,
    Submit { mode: FormMode, device: Device },
    Delete(DeviceId),

    // ── Outcomes ──────────────────────────────────────────────────
    Loaded(Result<Vec<Device>, CoreError>),
    Created(Result<Device, CoreError>),
    Updated(Result<Device, CoreError>),
    Deleted {
        id: DeviceId,
        outcome: Result<(), CoreError>,
    },
}

impl Action {
    /// Whether this action answers a background request.
    pub fn is_outcome(&self) -> bool {
        matches!(
            self,
            Self::Loaded(_) | Self::Created(_) | Self::Updated(_) | Self::Deleted { .. }
        )
    }
}
