//! Local fallback repository.
//!
//! Emulates the remote API's semantics (id assignment, partial updates,
//! idempotent deletes) on top of a single keyed entry in a `KeyValueStore`.
//! The store is assumed to belong to one process; two processes sharing a
//! directory can lose each other's writes.

use crate::domain::model::{NewProduct, Product, ProductId, ProductPatch};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::storage::kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
use crate::storage::seed;
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Key under which the full product sequence is stored.
pub const PRODUCTS_KEY: &str = "products";

pub struct LocalProductRepository {
    store: Arc<dyn KeyValueStore>,
    seed: Vec<Product>,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl LocalProductRepository {
    /// Repository over `store`, seeded from the bundled dataset on first read.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_seed(store, seed::default_products())
    }

    pub fn with_seed(store: Arc<dyn KeyValueStore>, seed: Vec<Product>) -> Self {
        Self {
            store,
            seed,
            lock: Mutex::new(()),
        }
    }

    pub fn file_backed(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::new(dir)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// `Ok(None)` when the entry has never been written.
    fn read(&self) -> Result<Option<Vec<Product>>, StoreError> {
        match self.store.get(PRODUCTS_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Writes the seed into the store and returns it.
    fn seed_store(&self) -> Vec<Product> {
        let seeded = self.seed.clone();
        match self.save(&seeded) {
            Ok(()) => tracing::info!("seeded local store with {} products", seeded.len()),
            Err(e) => tracing::warn!("failed to persist seed data: {}", e),
        }
        seeded
    }

    /// Read path: never fails. A missing or corrupt entry is reseeded; an
    /// unreadable store yields the seed without touching what is stored.
    fn load(&self) -> Vec<Product> {
        match self.read() {
            Ok(Some(products)) => products,
            Ok(None) => self.seed_store(),
            Err(StoreError::Encoding(e)) => {
                tracing::warn!("local store entry is corrupt, reseeding: {}", e);
                self.seed_store()
            }
            Err(e) => {
                tracing::warn!("local store unreadable, showing seed data: {}", e);
                self.seed.clone()
            }
        }
    }

    /// Write path: only a missing entry is seeded. Any read or decode failure
    /// is reported through `fail` so a write never lands on a substitute collection.
    fn load_strict(&self, fail: fn(String) -> CatalogError) -> CatalogResult<Vec<Product>> {
        match self.read() {
            Ok(Some(products)) => Ok(products),
            Ok(None) => Ok(self.seed_store()),
            Err(e) => Err(fail(e.to_string())),
        }
    }

    fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(products)?;
        self.store.set(PRODUCTS_KEY, &raw)
    }

    /// `local-` followed by 128 random bits, re-drawn on the (vanishingly rare)
    /// clash so ids stay unique within the collection.
    fn fresh_id(existing: &[Product]) -> ProductId {
        loop {
            let id = ProductId::Text(format!("local-{}", hex::encode(rand::random::<[u8; 16]>())));
            if !existing.iter().any(|p| p.id == id) {
                return id;
            }
        }
    }
}

#[async_trait]
impl ProductRepository for LocalProductRepository {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let _guard = self.lock.lock().await;
        Ok(self.load())
    }

    async fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        let _guard = self.lock.lock().await;
        self.load()
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn create(&self, product: NewProduct) -> CatalogResult<Product> {
        product.check()?;
        let _guard = self.lock.lock().await;
        let mut products = self.load_strict(CatalogError::Create)?;
        let created = Product::from_new(Self::fresh_id(&products), product, Utc::now());
        products.push(created.clone());
        self.save(&products)
            .map_err(|e| CatalogError::Create(e.to_string()))?;
        tracing::debug!("created local product {}", created.id);
        Ok(created)
    }

    async fn update(&self, id: &ProductId, patch: ProductPatch) -> CatalogResult<Product> {
        patch.check()?;
        let _guard = self.lock.lock().await;
        let mut products = self.load_strict(CatalogError::Update)?;
        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        product.apply(patch);
        let updated = product.clone();
        self.save(&products)
            .map_err(|e| CatalogError::Update(e.to_string()))?;
        tracing::debug!("updated local product {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<bool> {
        let _guard = self.lock.lock().await;
        let products = self.load_strict(CatalogError::Delete)?;
        let before = products.len();
        let remaining: Vec<Product> = products.into_iter().filter(|p| &p.id != id).collect();
        if remaining.len() != before {
            self.save(&remaining)
                .map_err(|e| CatalogError::Delete(e.to_string()))?;
            tracing::debug!("deleted local product {}", id);
        }
        Ok(true)
    }
}
