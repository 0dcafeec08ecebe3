// Responsible for all communication with the remote products endpoint.

use crate::domain::model::{NewProduct, Product, ProductId, ProductPatch};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

/// List responses come back either as a bare array or wrapped in `{ "products": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Bare(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

impl ListBody {
    fn into_products(self) -> Vec<Product> {
        match self {
            ListBody::Bare(products) | ListBody::Wrapped { products } => products,
        }
    }
}

/// REST client over a `/products` collection resource.
#[derive(Debug, Clone)]
pub struct RemoteProductRepository {
    client: Client,
    base_url: Url,
}

impl RemoteProductRepository {
    /// Builds a client for `base_url` (e.g. `http://localhost:3001/products`).
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Config(format!("failed to build HTTP client: {}", e)))?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> CatalogResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CatalogError::Config(format!("invalid API URL '{}': {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(CatalogError::Config(format!(
                "API URL must be an http(s) collection URL, got '{}'",
                base_url
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<id>`, with the id percent-encoded as one path segment.
    fn item_url(&self, id: &ProductId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.as_key());
        }
        url
    }
}

#[async_trait]
impl ProductRepository for RemoteProductRepository {
    fn backend_name(&self) -> &'static str {
        "remote"
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let res = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;
        if !res.status().is_success() {
            return Err(CatalogError::Fetch(format!(
                "GET {} returned {}",
                self.base_url,
                res.status()
            )));
        }
        let body: ListBody = res
            .json()
            .await
            .map_err(|e| CatalogError::Fetch(format!("invalid product list: {}", e)))?;
        let products = body.into_products();
        tracing::debug!("fetched {} products from {}", products.len(), self.base_url);
        Ok(products)
    }

    async fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        let url = self.item_url(id);
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;
        if !res.status().is_success() {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        res.json()
            .await
            .map_err(|e| CatalogError::Fetch(format!("invalid product {}: {}", id, e)))
    }

    async fn create(&self, product: NewProduct) -> CatalogResult<Product> {
        product.check()?;
        let res = self
            .client
            .post(self.base_url.clone())
            .json(&product)
            .send()
            .await
            .map_err(|e| CatalogError::Create(e.to_string()))?;
        if !res.status().is_success() {
            return Err(CatalogError::Create(format!(
                "POST {} returned {}",
                self.base_url,
                res.status()
            )));
        }
        let created: Product = res
            .json()
            .await
            .map_err(|e| CatalogError::Create(format!("invalid created product: {}", e)))?;
        tracing::debug!("created remote product {}", created.id);
        Ok(created)
    }

    async fn update(&self, id: &ProductId, patch: ProductPatch) -> CatalogResult<Product> {
        patch.check()?;
        let url = self.item_url(id);
        let res = self
            .client
            .put(url)
            .json(&patch)
            .send()
            .await
            .map_err(|e| CatalogError::Update(e.to_string()))?;
        match res.status() {
            StatusCode::NOT_FOUND => return Err(CatalogError::NotFound(id.to_string())),
            status if !status.is_success() => {
                return Err(CatalogError::Update(format!(
                    "PUT product {} returned {}",
                    id, status
                )));
            }
            _ => {}
        }
        res.json()
            .await
            .map_err(|e| CatalogError::Update(format!("invalid updated product {}: {}", id, e)))
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<bool> {
        let url = self.item_url(id);
        let res = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| CatalogError::Delete(e.to_string()))?;
        if !res.status().is_success() {
            return Err(CatalogError::Delete(format!(
                "DELETE product {} returned {}",
                id,
                res.status()
            )));
        }
        tracing::debug!("deleted remote product {}", id);
        Ok(true)
    }
}
