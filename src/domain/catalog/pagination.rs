//! Pagination calculator.

/// Page size of the catalog grid.
pub const CATALOG_PAGE_SIZE: usize = 6;
/// Page size of the compact listing.
pub const LISTING_PAGE_SIZE: usize = 8;

/// Slice bounds for one page. `end` is `start + items_per_page` and may run
/// past the collection; slicing clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub page: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

impl PageBounds {
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start.min(items.len());
        let end = self.end.min(items.len());
        &items[start..end]
    }
}

/// `ceil(total_items / items_per_page)`; zero items means zero pages.
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1))
}

/// Bounds for `requested_page`, clamped into `[1, total_pages]` (page 1 when there are no pages).
pub fn page_bounds(total_items: usize, items_per_page: usize, requested_page: usize) -> PageBounds {
    let per_page = items_per_page.max(1);
    let total_pages = total_pages(total_items, per_page);
    let page = requested_page.clamp(1, total_pages.max(1));
    let start = (page - 1) * per_page;
    PageBounds {
        page,
        total_pages,
        start,
        end: start + per_page,
    }
}

/// Current-page state for one listing.
///
/// Out-of-range navigation is ignored rather than reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    items_per_page: usize,
    total_items: usize,
}

impl Pagination {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.items_per_page)
    }

    pub fn bounds(&self) -> PageBounds {
        page_bounds(self.total_items, self.items_per_page, self.current_page)
    }

    /// Records a new item count; a page that no longer exists falls back to the last one.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page.clamp(1, self.total_pages().max(1));
    }

    /// Moves to `page` when it is within `[1, total_pages]`. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() && page != self.current_page {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(CATALOG_PAGE_SIZE)
    }
}
