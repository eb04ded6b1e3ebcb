//! Domain layer between `switchyard-api` and the UI front-ends (CLI / TUI).
//!
//! - **[`Controller`]** — Cloneable facade over the inventory API. Converts
//!   wire records into domain [`Device`]s and maps transport failures into
//!   [`CoreError`].
//!
//! - **[`query`]** — The table pipeline: [`SearchQuery`] filtering, stable
//!   [`SortField`]/[`SortOrder`] ordering, fixed-size pagination, and the
//!   caller-side [`TableView`] state that drives it.
//!
//! - **[`edit`]** — The nested field editor. Every change to a device is a
//!   [`DeviceEdit`] variant applied to a copy of the record.
//!
//! - **[`DeviceForm`]** — Working copy held between edits until submit or cancel.
//!
//! - **[`ConsoleState`]** — Application-root state: the ordered [`DeviceList`],
//!   the table view, and the last user-visible failure.

pub mod config;
pub mod controller;
pub mod convert;
pub mod edit;
pub mod error;
pub mod form;
pub mod model;
pub mod query;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ControllerConfig, TlsVerification};
pub use controller::Controller;
pub use edit::{DeviceEdit, EditError, LinkField, PortField, VlanField};
pub use error::CoreError;
pub use form::{DeviceForm, FormMode};
pub use model::{ConnectedDevice, Device, DeviceId, Port, PortStatus, Vlan, VlanStatus};
pub use query::{
    PAGE_SIZE, PageWindow, SearchQuery, SortField, SortOrder, TablePage, TableView,
};
pub use store::{ConsoleState, DeviceList};
