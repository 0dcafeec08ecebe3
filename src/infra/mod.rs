pub mod config;
pub mod remote;

pub use config::{Backend, CatalogConfig};
