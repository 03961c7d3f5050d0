//! Page-based windowing, the alternative to continuous scrolling.

use std::ops::Range;

/// Discrete page boundaries over a row set.
///
/// Pages are 1-based. An empty row set has zero pages and sits on page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Paginator {
    /// Create a paginator. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// `ceil(total_items / page_size)`
    pub fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Index range of the current page: `(page-1)*size .. page*size`,
    /// truncated at the end of the row set.
    pub fn page_range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total_items);
        let end = (self.page * self.page_size).min(self.total_items);
        start..end
    }

    /// The page containing a row index.
    pub fn page_of(&self, index: usize) -> usize {
        index / self.page_size + 1
    }

    fn last_page(&self) -> usize {
        self.page_count().max(1)
    }

    /// Go to a page, clamped to the valid range. Returns true if it changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let page = page.clamp(1, self.last_page());
        if page == self.page {
            return false;
        }
        log::debug!("[pagination] page {} -> {}", self.page, page);
        self.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> bool {
        self.set_page(1)
    }

    pub fn to_last_page(&mut self) -> bool {
        self.set_page(self.last_page())
    }

    /// Change the page size. Resets to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Row count change. Clamps the current page if the set shrank.
    pub fn set_total_items(&mut self, total: usize) {
        self.total_items = total;
        self.page = self.page.clamp(1, self.last_page());
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}
