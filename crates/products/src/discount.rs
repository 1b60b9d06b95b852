//! Percentage discounts.
//!
//! Parsing distinguishes "not a number" from "a number outside `[0, 100]`" so the
//! HTTP layer can report them with different messages, in that order.

use core::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use storefront_core::{parse_decimal, round_cents, Price};

/// Discount parse failure. `Display` is the exact client-facing message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiscountError {
    #[error("Invalid discount")]
    Invalid,

    #[error("Discount must be >= 0 and <= 100")]
    OutOfRange,
}

/// A percentage in `[0, 100]`, kept as a decimal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Discount(Decimal);

impl Discount {
    /// Parse a raw query value: format first, then range.
    ///
    /// Accepts plain decimals (`25`, `12.5`) and scientific notation (`2.5e1`).
    /// Numbers too large for a decimal are still numbers, so they fail the
    /// range check rather than the format check.
    pub fn parse(raw: &str) -> Result<Self, DiscountError> {
        let percent = parse_decimal(raw).ok_or(DiscountError::Invalid)?;
        Self::from_percent(percent)
    }

    pub fn from_percent(percent: Decimal) -> Result<Self, DiscountError> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DiscountError::OutOfRange);
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// `round(price × (1 − d/100), 2)`.
    ///
    /// The factor lies in `[0, 1]`, so the result stays within the bounds of
    /// the input price.
    pub fn apply(&self, price: Price) -> Price {
        let remaining = Decimal::ONE_HUNDRED - self.0;
        let discounted = round_cents(price.amount() * remaining / Decimal::ONE_HUNDRED);
        if discounted.is_zero() {
            return Price::ZERO;
        }
        Price::from_raw(discounted)
    }
}

impl FromStr for Discount {
    type Err = DiscountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
