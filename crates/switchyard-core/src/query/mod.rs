// ── Table pipeline ──
//
// Filter → Sort → Paginate over the in-memory device list. Everything here
// is synchronous and side-effect free; `TableView` holds the caller state.

pub mod filter;
pub mod paginate;
pub mod sort;
pub mod view;

pub use filter::{SearchQuery, filter_devices, matches};
pub use paginate::{PAGE_SIZE, PageWindow, page_slice, total_pages};
pub use sort::{SortField, SortOrder, sort_devices};
pub use view::{TablePage, TableView};
