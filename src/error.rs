//! Error types shared by every catalog operation.

use crate::domain::model::ValidationError;
use thiserror::Error;

/// Uniform error shape for repository, service and configuration failures.
///
/// Every variant carries a human-readable message; nothing is retried.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to fetch products: {0}")]
    Fetch(String),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Failed to create product: {0}")]
    Create(String),

    #[error("Failed to update product: {0}")]
    Update(String),

    #[error("Failed to delete product: {0}")]
    Delete(String),

    #[error("Invalid product: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
