// ── Application-root state ──
//
// The device list is owned by one container and mutated only through the
// update functions here: wholesale on load, element-wise on a settled
// create/update/delete.

mod console;
mod device_list;

pub use console::ConsoleState;
pub use device_list::DeviceList;
