use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use storefront_core::ProductId;
use storefront_products::{Discount, Product, ProductDraft, ProductQuery};

use super::r#trait::{ProductStore, StoreError, StoreResult};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<ProductId, Product>,
    next_id: i32,
}

impl Table {
    fn empty() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory product store for tests/dev.
///
/// Mirrors the `products` table: ids come from a counter starting at 1 and are
/// never reused, rows iterate in id order.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Table>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table::empty()),
        }
    }

    /// Drop every row and restart ids at 1.
    pub fn clear(&self) {
        if let Ok(mut table) = self.inner.write() {
            *table = Table::empty();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Table>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("product table lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Table>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("product table lock poisoned".to_string()))
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get(&self, id: ProductId) -> StoreResult<Product> {
        self.read()?.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list(&self, query: &ProductQuery) -> StoreResult<Vec<Product>> {
        let start = usize::try_from(query.start).unwrap_or(usize::MAX);
        let count = usize::try_from(query.count).unwrap_or(0);

        Ok(self
            .read()?
            .rows
            .values()
            .filter(|p| query.range.contains(p.price))
            .skip(start)
            .take(count)
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &ProductDraft) -> StoreResult<Product> {
        let mut table = self.write()?;
        let id = ProductId::from_db(table.next_id);
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Database("products id sequence exhausted".to_string()))?;

        let product = Product::new(id, draft.clone());
        table.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> StoreResult<Product> {
        let mut table = self.write()?;
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        *row = Product::new(id, draft.clone());
        Ok(row.clone())
    }

    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        self.write()?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn apply_discount(&self, id: ProductId, discount: Discount) -> StoreResult<Product> {
        let mut table = self.write()?;
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        *row = row.discounted(discount);
        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use rust_decimal::Decimal;
    use storefront_core::Price;
    use storefront_products::PriceRange;

    fn draft(name: &str, price: &str) -> ProductDraft {
        ProductDraft::new(name, Price::new(Decimal::from_str(price).unwrap()).unwrap()).unwrap()
    }

    fn id(raw: i32) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    async fn seeded(count: usize) -> InMemoryProductStore {
        let store = InMemoryProductStore::new();
        for i in 0..count {
            let price = ((i + 1) * 10).to_string();
            store.create(&draft(&format!("Product {i}"), &price)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = InMemoryProductStore::new();
        let a = store.create(&draft("a", "1")).await.unwrap();
        let b = store.create(&draft("b", "2")).await.unwrap();
        assert_eq!(a.id, id(1));
        assert_eq!(b.id, id(2));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = seeded(2).await;
        store.delete(id(2)).await.unwrap();
        let c = store.create(&draft("c", "3")).await.unwrap();
        assert_eq!(c.id, id(3));
    }

    #[tokio::test]
    async fn clear_restarts_ids() {
        let store = seeded(3).await;
        store.clear();
        assert!(store.is_empty());
        let p = store.create(&draft("fresh", "1")).await.unwrap();
        assert_eq!(p.id, id(1));
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = InMemoryProductStore::new();
        assert!(store.get(id(11)).await.unwrap_err().is_not_found());
        assert!(store.update(id(11), &draft("x", "1")).await.unwrap_err().is_not_found());
        assert!(store.delete(id(11)).await.unwrap_err().is_not_found());
        let discount = Discount::parse("50").unwrap();
        assert!(store.apply_discount(id(11), discount).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_filters_by_inclusive_price_range_in_id_order() {
        let store = seeded(10).await;
        let query = ProductQuery {
            range: PriceRange::new(Decimal::new(60, 0), Decimal::new(70, 0)),
            ..ProductQuery::default()
        };

        let names: Vec<_> = store
            .list(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Product 5", "Product 6"]);
    }

    #[tokio::test]
    async fn list_applies_window() {
        let store = seeded(10).await;
        let query = ProductQuery {
            count: 3,
            start: 8,
            ..ProductQuery::default()
        };

        let ids: Vec<_> = store.list(&query).await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![id(9), id(10)]);
    }

    #[tokio::test]
    async fn update_replaces_name_and_price() {
        let store = seeded(1).await;
        let updated = store.update(id(1), &draft("renamed", "11.22")).await.unwrap();
        assert_eq!(updated.id, id(1));
        assert_eq!(store.get(id(1)).await.unwrap(), updated);
        assert_eq!(updated.name, "renamed");
    }

    #[tokio::test]
    async fn apply_discount_persists_new_price() {
        let store = seeded(1).await;
        let discounted = store
            .apply_discount(id(1), Discount::parse("25").unwrap())
            .await
            .unwrap();
        assert_eq!(discounted.price.amount(), Decimal::new(750, 2));
        assert_eq!(store.get(id(1)).await.unwrap().price, discounted.price);
    }
}
