//! Infrastructure layer: database configuration, connection pool, product storage.

pub mod config;
pub mod db;
pub mod product_store;

pub use config::DatabaseConfig;
pub use product_store::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError, StoreResult};
