//! Bundled default dataset used to seed an empty local store.

use crate::domain::model::Product;

const DEFAULT_DATASET: &str = include_str!("../../data/default_products.json");

/// Parses the bundled dataset. A malformed bundle yields an empty catalog.
pub fn default_products() -> Vec<Product> {
    match serde_json::from_str(DEFAULT_DATASET) {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!("bundled product dataset is malformed, seeding empty catalog: {}", e);
            Vec::new()
        }
    }
}
