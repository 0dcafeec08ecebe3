//! Headless state for the product listing.
//!
//! `CatalogView` is owned by the topmost view and passed down explicitly.
//! Its reset rule: any change to the search term, price range, or sort
//! option sends the listing back to page 1. A shrinking collection clamps
//! the current page to the last page that still exists.

use crate::domain::catalog::{filter_and_sort, FilterState, Pagination, PriceRange, SortOption};
use crate::domain::model::{Product, ProductId};
use crate::error::CatalogResult;

pub const EMPTY_STATE_TITLE: &str = "No products found";
pub const EMPTY_STATE_HINT: &str = "Try changing your filters or add a new product.";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewStatus {
    Loading,
    Ready,
    /// Nothing to show; render the empty-state message, not an error.
    Empty,
    Failed(String),
}

/// Identifies one list fetch so late results can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What the listing renders for the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Products that passed the filters, across all pages.
    pub total_items: usize,
}

impl CatalogPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    products: Vec<Product>,
    filter: FilterState,
    pagination: Pagination,
    visible: Vec<Product>,
    status: ViewStatus,
    latest_load: u64,
    open: bool,
}

impl CatalogView {
    pub fn new(page_size: usize) -> Self {
        Self {
            products: Vec::new(),
            filter: FilterState::default(),
            pagination: Pagination::new(page_size),
            visible: Vec::new(),
            status: ViewStatus::Loading,
            latest_load: 0,
            open: true,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.filter.search {
            self.filter.search = search;
            self.filters_changed();
        }
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        if range != self.filter.price_range {
            self.filter.price_range = range;
            self.filters_changed();
        }
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        if sort != self.filter.sort {
            self.filter.sort = sort;
            self.filters_changed();
        }
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pagination.go_to_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.pagination.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pagination.prev_page()
    }

    /// Snapshot of the current page.
    pub fn page(&self) -> CatalogPage {
        let bounds = self.pagination.bounds();
        CatalogPage {
            items: bounds.slice(&self.visible).to_vec(),
            current_page: bounds.page,
            total_pages: bounds.total_pages,
            total_items: self.visible.len(),
        }
    }

    /// Marks a list fetch as in flight. Only the most recent ticket is honoured.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        self.status = ViewStatus::Loading;
        LoadTicket(self.latest_load)
    }

    /// Applies a finished fetch. Results for superseded tickets, or arriving
    /// after `close`, are dropped. A failed fetch keeps the previous collection.
    /// Returns whether the result was applied.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: CatalogResult<Vec<Product>>) -> bool {
        if !self.open || ticket.0 != self.latest_load {
            tracing::debug!("discarding stale product list (ticket {})", ticket.0);
            return false;
        }
        match result {
            Ok(products) => {
                self.products = products;
                self.recompute();
                self.status = self.settled_status();
            }
            Err(e) => {
                self.status = ViewStatus::Failed(e.to_string());
            }
        }
        true
    }

    /// The owning view went away; later fetch results are ignored.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn apply_created(&mut self, product: Product) {
        self.products.push(product);
        self.collection_changed();
    }

    pub fn apply_updated(&mut self, product: Product) {
        if let Some(existing) = self.products.iter_mut().find(|p| p.id == product.id) {
            *existing = product;
            self.collection_changed();
        }
    }

    pub fn apply_removed(&mut self, id: &ProductId) {
        let before = self.products.len();
        self.products.retain(|p| &p.id != id);
        if self.products.len() != before {
            self.collection_changed();
        }
    }

    fn filters_changed(&mut self) {
        self.pagination.reset();
        self.recompute();
        self.refresh_status();
    }

    fn collection_changed(&mut self) {
        self.recompute();
        self.refresh_status();
    }

    fn recompute(&mut self) {
        self.visible = filter_and_sort(&self.products, &self.filter);
        self.pagination.set_total_items(self.visible.len());
    }

    /// Ready/Empty follow the data; Loading and Failed wait for the next load.
    fn refresh_status(&mut self) {
        if matches!(self.status, ViewStatus::Ready | ViewStatus::Empty) {
            self.status = self.settled_status();
        }
    }

    fn settled_status(&self) -> ViewStatus {
        if self.visible.is_empty() {
            ViewStatus::Empty
        } else {
            ViewStatus::Ready
        }
    }
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new(crate::domain::catalog::CATALOG_PAGE_SIZE)
    }
}
