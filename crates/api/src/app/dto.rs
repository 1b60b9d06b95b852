use serde::Deserialize;

use storefront_core::{parse_decimal, Price, ProductId};
use storefront_products::{PriceRange, ProductDraft, ProductQuery};

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /product` and `PUT /product/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: Price,
}

impl ProductRequest {
    pub fn into_draft(self) -> Result<ProductDraft, ApiError> {
        ProductDraft::new(self.name, self.price).map_err(|_| ApiError::InvalidPayload)
    }
}

/// Any body that is not a `{name, price}` object with a non-empty name and an
/// in-range, non-negative price is an invalid payload.
pub fn parse_product_request(body: &[u8]) -> Result<ProductDraft, ApiError> {
    serde_json::from_slice::<ProductRequest>(body)
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected product payload");
            ApiError::InvalidPayload
        })?
        .into_draft()
}

pub fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidProductId)
}

/// First value for `key`, like a form lookup; later duplicates are ignored.
pub fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

// -------------------------
// List query parameters
// -------------------------

/// `GET /products` query string, parsed permissively.
///
/// Contract: a missing or unparseable parameter silently takes its default; this
/// endpoint never answers 400 because of its query string. A price bound that is
/// a number too large for a decimal saturates instead of being dropped.
///
/// | param | default | adjustment |
/// |---|---|---|
/// | `min_price` | `0` | none |
/// | `max_price` | unbounded | none |
/// | `count` | `10` | clamped into `[1, 10]` |
/// | `start` | `0` | negatives become `0` |
pub fn list_query(pairs: &[(String, String)]) -> ProductQuery {
    let defaults = PriceRange::default();
    let min = first_value(pairs, "min_price")
        .and_then(parse_decimal)
        .unwrap_or(defaults.min);
    let max = first_value(pairs, "max_price")
        .and_then(parse_decimal)
        .unwrap_or(defaults.max);

    let count = first_value(pairs, "count")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(ProductQuery::DEFAULT_COUNT)
        .clamp(1, ProductQuery::MAX_COUNT);
    let start = first_value(pairs, "start")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
        .max(0);

    ProductQuery {
        range: PriceRange::new(min, max),
        count,
        start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_query_uses_defaults() {
        assert_eq!(list_query(&[]), ProductQuery::default());
    }

    #[test]
    fn reads_price_bounds() {
        let q = list_query(&pairs(&[("min_price", "60"), ("max_price", "70.5")]));
        assert_eq!(q.range, PriceRange::new(Decimal::new(60, 0), Decimal::new(705, 1)));
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let q = list_query(&pairs(&[
            ("min_price", "cheap"),
            ("max_price", ""),
            ("count", "ten"),
            ("start", "1.5"),
        ]));
        assert_eq!(q, ProductQuery::default());
    }

    #[test]
    fn oversized_price_bounds_saturate() {
        let q = list_query(&pairs(&[("min_price", "1e30"), ("max_price", "100")]));
        assert_eq!(q.range.min, Decimal::MAX);
        assert!(q.range.is_empty());

        let q = list_query(&pairs(&[("max_price", "-1e30")]));
        assert_eq!(q.range.max, Decimal::MIN);
        assert!(q.range.is_empty());
    }

    #[test]
    fn count_is_clamped_and_start_floored() {
        let q = list_query(&pairs(&[("count", "0"), ("start", "-4")]));
        assert_eq!((q.count, q.start), (1, 0));

        let q = list_query(&pairs(&[("count", "50"), ("start", "3")]));
        assert_eq!((q.count, q.start), (10, 3));

        let q = list_query(&pairs(&[("count", "-7")]));
        assert_eq!(q.count, 1);
    }

    #[test]
    fn first_value_wins() {
        let p = pairs(&[("count", "2"), ("count", "5")]);
        assert_eq!(first_value(&p, "count"), Some("2"));
        assert_eq!(first_value(&p, "start"), None);
    }

    #[test]
    fn product_payload_validation() {
        let draft = parse_product_request(br#"{"name":"test product", "price": 11.22}"#).unwrap();
        assert_eq!(draft.name(), "test product");
        assert_eq!(draft.price().amount(), Decimal::new(1122, 2));

        for bad in [
            &b"not json"[..],
            br#"{"name":"x"}"#,
            br#"{"price":1}"#,
            br#"{"name":"","price":1}"#,
            br#"{"name":"x","price":-1}"#,
            br#"{"name":"x","price":"abc"}"#,
            br#"[]"#,
        ] {
            assert!(
                matches!(parse_product_request(bad), Err(ApiError::InvalidPayload)),
                "{} should be rejected",
                String::from_utf8_lossy(bad)
            );
        }
    }

    #[test]
    fn product_id_must_be_positive_integer() {
        assert!(parse_product_id("1").is_ok());
        assert!(matches!(parse_product_id("abc"), Err(ApiError::InvalidProductId)));
        assert!(matches!(parse_product_id("0"), Err(ApiError::InvalidProductId)));
    }
}
