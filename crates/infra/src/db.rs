//! Connection pool and `products` table bootstrap.

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::product_store::postgres::map_sqlx_error;
use crate::product_store::StoreResult;

/// Table definition the product store expects.
pub const PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products
(
    id SERIAL,
    name TEXT NOT NULL,
    price NUMERIC(10,2) NOT NULL DEFAULT 0.00,
    CONSTRAINT products_pkey PRIMARY KEY (id)
)
"#;

/// Open the process-wide connection pool.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .context("failed to connect to Postgres")
}

/// Create the `products` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    sqlx::query(PRODUCTS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    tracing::debug!("products table ready");
    Ok(())
}

/// Delete every product and restart the id sequence at 1.
pub async fn reset_products(pool: &PgPool) -> StoreResult<()> {
    sqlx::query("DELETE FROM products")
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("reset_products", e))?;
    sqlx::query("ALTER SEQUENCE products_id_seq RESTART WITH 1")
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("reset_products", e))?;
    Ok(())
}
