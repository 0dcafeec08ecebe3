//! Pure catalog transforms: filtering, sorting, pagination and display formatting.

pub mod display;
pub mod filter;
pub mod pagination;

pub use display::{format_brl, format_created_date};
pub use filter::{
    compare_names, filter_and_sort, matches_search, FilterState, ParseSortOptionError, PriceRange,
    SortDirection, SortField, SortOption,
};
pub use pagination::{
    page_bounds, total_pages, PageBounds, Pagination, CATALOG_PAGE_SIZE, LISTING_PAGE_SIZE,
};
