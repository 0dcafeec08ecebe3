pub mod kv;
pub mod local;
pub mod seed;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use local::{LocalProductRepository, PRODUCTS_KEY};
