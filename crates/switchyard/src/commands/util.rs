//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use switchyard_api::SwitchRecord;
use switchyard_core::{Controller, Device, DeviceEdit, DeviceId, edit};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Run `fut` behind a stderr spinner when interactive and not `--quiet`.
pub async fn with_spinner<T, F>(global: &GlobalOpts, message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    if global.quiet || !std::io::stderr().is_terminal() {
        return fut.await;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let out = fut.await;
    spinner.finish_and_clear();
    out
}

/// Fetch the list and resolve a device by id or exact name.
pub async fn resolve_device(
    controller: &Controller,
    global: &GlobalOpts,
    identifier: &str,
) -> Result<Device, CliError> {
    Ok(with_spinner(global, "Fetching devices", controller.resolve_device(identifier)).await?)
}

/// Apply `--set` expressions in order, stopping at the first bad one.
pub fn apply_edits(mut device: Device, exprs: &[String]) -> Result<Device, CliError> {
    for expr in exprs {
        let parsed: DeviceEdit = expr.parse().map_err(|source| CliError::InvalidEdit {
            expr: expr.clone(),
            source,
        })?;
        device = edit::apply(&device, parsed).map_err(|source| CliError::InvalidEdit {
            expr: expr.clone(),
            source,
        })?;
    }
    Ok(device)
}

/// Read a JSON switch record as the starting point of a new device.
///
/// Any identity in the file is discarded; the result is a fresh draft.
pub fn read_device_file(path: &Path) -> Result<Device, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let mut record: SwitchRecord =
        serde_json::from_str(&contents).map_err(|e| CliError::Validation {
            field: "from-file".into(),
            reason: format!("invalid switch record: {e}"),
        })?;
    let draft = DeviceId::draft();
    record.record_id = None;
    record.id = Some(draft.to_string());
    let mut device = Device::try_from(record)?;
    device.id = draft;
    device.client_ref = None;
    Ok(device)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use switchyard_core::{PortStatus, VlanStatus};

    #[test]
    fn edits_apply_in_order() {
        let exprs: Vec<String> = [
            "name=SW9",
            "ports+",
            "ports.0.status=disabled",
            "ports.0.connected_to.device=core-1",
            "vlans+",
            "vlans.0.id=30",
            "vlans.0.status=error",
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        let d = apply_edits(Device::draft(), &exprs).unwrap();
        assert_eq!(d.name, "SW9");
        assert_eq!(d.ports[0].status, PortStatus::Disabled);
        assert_eq!(d.ports[0].connected_to.as_ref().unwrap().device, "core-1");
        assert_eq!(d.vlans[0].id, 30);
        assert_eq!(d.vlans[0].status, VlanStatus::Error);
    }

    #[test]
    fn bad_edit_names_the_expression() {
        let err = apply_edits(Device::draft(), &["ports.0.vlan=10".into()]).unwrap_err();
        assert!(matches!(err, CliError::InvalidEdit { ref expr, .. } if expr == "ports.0.vlan=10"));
    }

    #[test]
    fn device_file_becomes_a_draft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sw.json");
        std::fs::write(
            &path,
            r#"{"_id":"old","name":"SW-file","ip":"10.2.0.1","ports":[],"vlans":[{"id":5}]}"#,
        )
        .unwrap();
        let d = read_device_file(&path).unwrap();
        assert!(d.id.is_draft());
        assert_eq!(d.name, "SW-file");
        assert_eq!(d.vlans[0].id, 5);
    }
}
