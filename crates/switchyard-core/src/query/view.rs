//! Caller-side table state: search text, sort key, and current page.

use crate::model::Device;

use super::filter::SearchQuery;
use super::paginate::{PAGE_SIZE, PageWindow, page_slice, total_pages};
use super::sort::{SortField, SortOrder, sort_devices};

/// Search, sort, and page selection for the device table.
///
/// The page is kept in `1..=max(total_pages, 1)` by every mutator that
/// takes the current page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    search: String,
    sort_field: SortField,
    sort_order: SortOrder,
    page: usize,
    page_size: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_field: SortField::Name,
            sort_order: SortOrder::Asc,
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

/// One rendered page of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a Device>,
    /// Devices passing the filter, across all pages.
    pub matched: usize,
    pub page: usize,
    pub total_pages: usize,
    pub window: PageWindow,
}

impl TableView {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Clicking a column header: the active column flips direction,
    /// any other column becomes active in ascending order.
    pub fn sort_by(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Set field and direction outright.
    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        self.sort_field = field;
        self.sort_order = order;
    }

    /// Replace the query and return to the first page.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 1;
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Jump to `page`, clamped into range.
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    /// Re-clamp after the underlying list shrank.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.set_page(self.page, total_pages);
    }

    /// Filter → Sort → Paginate.
    pub fn project<'a>(&self, devices: &'a [Device]) -> TablePage<'a> {
        let query = SearchQuery::new(&self.search);
        let mut matched: Vec<&Device> = devices.iter().filter(|d| query.matches(d)).collect();
        sort_devices(&mut matched, self.sort_field, self.sort_order);

        let total = total_pages(matched.len(), self.page_size);
        TablePage {
            rows: page_slice(&matched, self.page, self.page_size).to_vec(),
            matched: matched.len(),
            page: self.page,
            total_pages: total,
            window: PageWindow::new(self.page, self.page_size, matched.len()),
        }
    }
}
