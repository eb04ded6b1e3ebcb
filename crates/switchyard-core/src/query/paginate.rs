//! Fixed-size pages over an ordered list.
//!
//! The paginator never clamps the requested page. Callers keep the page in
//! `1..=total_pages`; anything outside yields an empty slice.

/// Rows per table page.
pub const PAGE_SIZE: usize = 10;

/// The `page`-th (1-based) slice of `size` items.
pub fn page_slice<T>(items: &[T], page: usize, size: usize) -> &[T] {
    if page == 0 || size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(size);
    let end = start.saturating_add(size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// `ceil(len / size)`; zero when there is nothing to show.
pub fn total_pages(len: usize, size: usize) -> usize {
    if size == 0 { 0 } else { len.div_ceil(size) }
}

/// Row range shown on a page, for "Showing X to Y of Z results".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based index of the first visible row; 0 when nothing is visible.
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl PageWindow {
    pub fn new(page: usize, size: usize, total: usize) -> Self {
        let shown = if page == 0 || size == 0 {
            0
        } else {
            let start = (page - 1).saturating_mul(size);
            total.saturating_sub(start).min(size)
        };
        if shown == 0 {
            return Self {
                first: 0,
                last: 0,
                total,
            };
        }
        let first = (page - 1) * size + 1;
        Self {
            first,
            last: first + shown - 1,
            total,
        }
    }
}

impl std::fmt::Display for PageWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} results",
            self.first, self.last, self.total
        )
    }
}
