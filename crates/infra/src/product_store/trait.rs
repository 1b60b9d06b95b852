use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use storefront_core::ProductId;
use storefront_products::{Discount, Product, ProductDraft, ProductQuery};

/// Result type for every store operation.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation error.
///
/// Stores only tell "no such row" apart from "the operation failed". Input
/// validity is the caller's concern and never shows up here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The statement matched zero rows.
    #[error("product not found")]
    NotFound,

    /// The database rejected the statement or could not be reached.
    #[error("database error: {0}")]
    Database(String),

    /// The connection pool is closed or exhausted.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Product persistence operations.
///
/// ## Outcomes
///
/// Each operation resolves to exactly one of:
/// - `Ok(value)`
/// - `Err(StoreError::NotFound)`: zero rows matched (detected structurally)
/// - `Err(StoreError::Database | Unavailable)`: operational failure
///
/// `list` and `create` cannot be "not found".
///
/// ## Trust
///
/// Implementations perform no input validation; ids, drafts, discounts and
/// query windows arrive already validated by the request layer.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get(&self, id: ProductId) -> StoreResult<Product>;

    /// Products with `range.min <= price <= range.max`, ordered by id,
    /// `count` rows starting at `start`.
    async fn list(&self, query: &ProductQuery) -> StoreResult<Vec<Product>>;

    /// Insert a new row; the store assigns the id.
    async fn create(&self, draft: &ProductDraft) -> StoreResult<Product>;

    /// Replace name and price wholesale.
    async fn update(&self, id: ProductId, draft: &ProductDraft) -> StoreResult<Product>;

    /// Hard delete.
    async fn delete(&self, id: ProductId) -> StoreResult<()>;

    /// Reduce the stored price by `discount` in a single write.
    async fn apply_discount(&self, id: ProductId, discount: Discount) -> StoreResult<Product>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn get(&self, id: ProductId) -> StoreResult<Product> {
        (**self).get(id).await
    }

    async fn list(&self, query: &ProductQuery) -> StoreResult<Vec<Product>> {
        (**self).list(query).await
    }

    async fn create(&self, draft: &ProductDraft) -> StoreResult<Product> {
        (**self).create(draft).await
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> StoreResult<Product> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        (**self).delete(id).await
    }

    async fn apply_discount(&self, id: ProductId, discount: Discount) -> StoreResult<Product> {
        (**self).apply_discount(id, discount).await
    }
}
