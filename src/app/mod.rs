pub mod catalog_service;
pub mod catalog_view;

pub use catalog_service::CatalogService;
pub use catalog_view::{
    CatalogPage, CatalogView, LoadTicket, ViewStatus, EMPTY_STATE_HINT, EMPTY_STATE_TITLE,
};

use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;
use crate::infra::config::{Backend, CatalogConfig};
use crate::infra::remote::RemoteProductRepository;
use crate::storage::LocalProductRepository;
use std::sync::Arc;

/// Picks the repository implementation named by `config.backend`.
pub fn build_repository(config: &CatalogConfig) -> CatalogResult<Arc<dyn ProductRepository>> {
    let repository: Arc<dyn ProductRepository> = match config.backend {
        Backend::Remote => Arc::new(RemoteProductRepository::new(
            &config.api_url,
            config.http_timeout,
        )?),
        Backend::Local => Arc::new(LocalProductRepository::file_backed(config.store_dir.clone())),
    };
    tracing::info!("using {} product repository", repository.backend_name());
    Ok(repository)
}
