//! List filter: inclusive price range plus a bounded window.

use rust_decimal::Decimal;

use storefront_core::Price;

/// Inclusive `[min, max]` price filter (`price BETWEEN min AND max`).
///
/// `min > max` is allowed and matches nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, price: Price) -> bool {
        let amount = price.amount();
        self.min <= amount && amount <= self.max
    }
}

impl Default for PriceRange {
    /// Everything from zero upward.
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::MAX,
        }
    }
}

/// One page of the product list, ordered by id.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub range: PriceRange,
    /// Row limit, already clamped by the caller.
    pub count: i64,
    /// Row offset, already clamped by the caller.
    pub start: i64,
}

impl ProductQuery {
    pub const DEFAULT_COUNT: i64 = 10;
    pub const MAX_COUNT: i64 = 10;
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            range: PriceRange::default(),
            count: Self::DEFAULT_COUNT,
            start: 0,
        }
    }
}
