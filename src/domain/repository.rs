//! The persistence contract shared by the remote and local backends.

use crate::domain::model::{NewProduct, Product, ProductId, ProductPatch};
use crate::error::CatalogResult;
use async_trait::async_trait;

/// Contract for any product backend.
///
/// Callers hold an `Arc<dyn ProductRepository>` chosen once at construction
/// time, so no call site needs to know which backend answers.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Short backend label used in logs.
    fn backend_name(&self) -> &'static str;

    /// Every product in the backing collection, in storage order.
    async fn list(&self) -> CatalogResult<Vec<Product>>;

    /// Looks a product up by string-normalized id.
    async fn get(&self, id: &ProductId) -> CatalogResult<Product>;

    /// Stores a new product. The backend assigns `id` and `createdAt`.
    async fn create(&self, product: NewProduct) -> CatalogResult<Product>;

    /// Merges `patch` over the stored record and returns the result.
    async fn update(&self, id: &ProductId, patch: ProductPatch) -> CatalogResult<Product>;

    /// Removes a product. Removing an id that is already gone is not an error.
    async fn delete(&self, id: &ProductId) -> CatalogResult<bool>;
}
