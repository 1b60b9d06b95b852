//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError | Scenario |
//! |------------|------------|----------|
//! | zero rows from `fetch_optional` / `rows_affected() == 0` | `NotFound` | id does not exist |
//! | PoolClosed / PoolTimedOut | `Unavailable` | pool shut down or exhausted |
//! | Database (any code) | `Database` | constraint violation, bad statement, ... |
//! | Other | `Database` | network errors, decode failures, ... |
//!
//! `NotFound` never comes from `sqlx::Error::RowNotFound`: every statement uses
//! `fetch_optional`/`fetch_all`/`execute` so absence is read from the result shape.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use storefront_core::{Price, ProductId};
use storefront_products::{Discount, Product, ProductDraft, ProductQuery};

use super::r#trait::{ProductStore, StoreError, StoreResult};

/// Postgres-backed product store over the `products` table.
///
/// Cloning is cheap; all clones share one connection pool, which is safe for
/// concurrent use by in-flight requests.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn get(&self, id: ProductId) -> StoreResult<Product> {
        let row = sqlx::query("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_product", e))?;

        row.map(|r| decode_product("get_product", &r))
            .transpose()?
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self), fields(min = %query.range.min, max = %query.range.max), err)]
    async fn list(&self, query: &ProductQuery) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price
            FROM products
            WHERE price BETWEEN $1 AND $2
            ORDER BY id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(query.range.min)
        .bind(query.range.max)
        .bind(query.count)
        .bind(query.start)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_products", e))?;

        rows.iter()
            .map(|r| decode_product("list_products", r))
            .collect()
    }

    #[instrument(skip(self, draft), err)]
    async fn create(&self, draft: &ProductDraft) -> StoreResult<Product> {
        let row = sqlx::query(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING id, name, price",
        )
        .bind(draft.name())
        .bind(draft.price().amount())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_product", e))?;

        decode_product("create_product", &row)
    }

    #[instrument(skip(self, draft), fields(product_id = %id), err)]
    async fn update(&self, id: ProductId, draft: &ProductDraft) -> StoreResult<Product> {
        let row = sqlx::query(
            "UPDATE products SET name = $2, price = $3 WHERE id = $1 RETURNING id, name, price",
        )
        .bind(id.get())
        .bind(draft.name())
        .bind(draft.price().amount())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_product", e))?;

        row.map(|r| decode_product("update_product", &r))
            .transpose()?
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Computed in SQL so read and write are one atomic statement. Postgres
    /// `ROUND(numeric, 2)` rounds half away from zero, same as `Discount::apply`.
    #[instrument(skip(self), fields(product_id = %id, percent = %discount.percent()), err)]
    async fn apply_discount(&self, id: ProductId, discount: Discount) -> StoreResult<Product> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET price = ROUND(price * (100 - $2) / 100, 2)
            WHERE id = $1
            RETURNING id, name, price
            "#,
        )
        .bind(id.get())
        .bind(discount.percent())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("apply_discount", e))?;

        row.map(|r| decode_product("apply_discount", &r))
            .transpose()?
            .ok_or(StoreError::NotFound)
    }
}

struct ProductRow {
    id: i32,
    name: String,
    price: Decimal,
}

impl<'r> FromRow<'r, sqlx::postgres::PgRow> for ProductRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
        })
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::from_db(row.id),
            name: row.name,
            price: Price::from_raw(row.price),
        }
    }
}

fn decode_product(operation: &str, row: &sqlx::postgres::PgRow) -> StoreResult<Product> {
    ProductRow::from_row(row)
        .map(Product::from)
        .map_err(|e| StoreError::Database(format!("failed to decode product row in {operation}: {e}")))
}

/// Map a SQLx error to a `StoreError`.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            StoreError::Database(format!(
                "database error in {operation} (code {code}): {}",
                db_err.message()
            ))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool timed out in {operation}"))
        }
        _ => StoreError::Database(format!("sqlx error in {operation}: {err}")),
    }
}
