//! Catalog data model: the product record, its create/update inputs, and the
//! form that produces create input.

pub mod form;
pub mod product;

pub use form::{ProductForm, ValidationError};
pub use product::{iso_timestamp, Category, NewProduct, Product, ProductId, ProductPatch};
