//! Persistence wiring: pick and build the product store for this process.

use std::sync::Arc;

use storefront_infra::{db, DatabaseConfig, InMemoryProductStore, PostgresProductStore, ProductStore};

use crate::config::ApiConfig;

/// Store handle shared by every in-flight request.
pub type SharedStore = Arc<dyn ProductStore>;

pub async fn build_store(config: &ApiConfig) -> anyhow::Result<SharedStore> {
    if !config.use_persistent_stores {
        tracing::warn!("USE_PERSISTENT_STORES=false; serving products from memory");
        return Ok(in_memory_store());
    }

    let db_config = DatabaseConfig::from_env()?;
    let pool = db::connect(&db_config).await?;
    if config.ensure_schema {
        db::ensure_schema(&pool).await?;
    }
    tracing::info!(max_connections = db_config.max_connections, "connected to Postgres");

    Ok(Arc::new(PostgresProductStore::new(pool)))
}

pub fn in_memory_store() -> SharedStore {
    Arc::new(InMemoryProductStore::new())
}
