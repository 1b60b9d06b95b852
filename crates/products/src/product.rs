use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Price, ProductId};

use crate::discount::Discount;

/// A stored product.
///
/// Serializes to the wire shape `{"id": 1, "name": "...", "price": 11.22}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

impl Product {
    pub fn new(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
        }
    }

    /// Copy of this product with `discount` taken off its price.
    pub fn discounted(&self, discount: Discount) -> Self {
        Self {
            price: discount.apply(self.price),
            ..self.clone()
        }
    }
}

/// Validated name/price pair used for both create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    price: Price,
}

impl ProductDraft {
    /// The price is already bounded by [`Price`]; only the name needs checking.
    pub fn new(name: impl Into<String>, price: Price) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        Ok(Self { name, price })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }
}
