pub mod catalog;
pub mod model;
pub mod repository;

pub use repository::ProductRepository;
