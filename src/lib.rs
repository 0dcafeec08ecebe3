pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;

// Convenience re-exports (keeps call-sites clean)
pub use app::{build_repository, CatalogPage, CatalogService, CatalogView, ViewStatus};
pub use domain::catalog::{filter_and_sort, FilterState, Pagination, PriceRange, SortOption};
pub use domain::model::{Category, NewProduct, Product, ProductForm, ProductId, ProductPatch};
pub use domain::ProductRepository;
pub use error::{CatalogError, CatalogResult};
pub use infra::{Backend, CatalogConfig};
pub use infra::remote::RemoteProductRepository;
pub use storage::LocalProductRepository;
