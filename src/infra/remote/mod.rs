pub mod client;

pub use client::RemoteProductRepository;
