//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a product row.
///
/// Assigned by persistence (`SERIAL`), so only positive 32-bit values exist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i32);

impl ProductId {
    pub fn new(raw: i32) -> Result<Self, DomainError> {
        if raw <= 0 {
            return Err(DomainError::invalid_id(format!("ProductId: {raw} is not positive")));
        }
        Ok(Self(raw))
    }

    /// Wrap a value read back from storage without re-checking it.
    pub fn from_db(raw: i32) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<ProductId> for i32 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

/// Parses a path segment. Only plain ASCII digits are accepted (no sign, no
/// whitespace), matching the `{id:[0-9]+}` route shape.
impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_id(format!("ProductId: {s:?} is not a number")));
        }
        let raw = s
            .parse::<i32>()
            .map_err(|e| DomainError::invalid_id(format!("ProductId: {e}")))?;
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_digits() {
        let id: ProductId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn rejects_zero_sign_and_garbage() {
        for raw in ["0", "-1", "+1", "abc", "", " 1", "1.0", "99999999999"] {
            assert!(raw.parse::<ProductId>().is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn serializes_as_bare_integer() {
        let id = ProductId::new(7).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }
}
