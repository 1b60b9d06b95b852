//! Fixed-point product price.
//!
//! Prices are `NUMERIC(10,2)` in storage, so the domain keeps them as
//! [`Decimal`] with exactly two fractional digits. Binary floating point is only
//! touched at the JSON boundary, where the value is emitted as a plain number.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// A non-negative amount with two-digit fractional precision.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(Decimal);

impl Price {
    /// Fractional digits kept for every price.
    pub const SCALE: u32 = 2;

    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Largest value a `NUMERIC(10,2)` column can hold: `99999999.99`.
    pub fn max_amount() -> Decimal {
        Decimal::new(99_999_999_99, Self::SCALE)
    }

    /// Round `amount` to two places (midpoint away from zero) and check bounds.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        let rounded = round_cents(amount);
        if rounded < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "price must be >= 0, got {amount}"
            )));
        }
        if rounded > Self::max_amount() {
            return Err(DomainError::validation(format!(
                "price must be <= {}, got {amount}",
                Self::max_amount()
            )));
        }
        // Drop the sign of a rounded negative zero.
        if rounded.is_zero() {
            return Ok(Self::ZERO);
        }
        Ok(Self(rounded))
    }

    /// Wrap an amount whose bounds the caller already guarantees (storage reads,
    /// discounted prices).
    pub fn from_raw(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// Standard two-place rounding used for every stored price.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(Price::SCALE, RoundingStrategy::MidpointAwayFromZero)
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// JSON shape is a bare number: `60`, `7.5`, `11.22`.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = self.0.normalize();
        if normalized.scale() == 0 {
            if let Some(whole) = normalized.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match normalized.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(serde::ser::Error::custom(format!(
                "price {normalized} is not representable as a JSON number"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Price::new(amount).map_err(serde::de::Error::custom)
    }
}
