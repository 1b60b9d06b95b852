//! Decimal parsing for numbers that arrive as text (query strings).

use core::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Parse `raw` as a decimal in plain (`12.5`) or scientific (`1.25e1`) notation.
///
/// A finite number too large for [`Decimal`] saturates to [`Decimal::MAX`] or
/// [`Decimal::MIN`] by sign, and one too small to represent becomes zero.
/// Returns `None` only when `raw` is not a finite number at all.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    if let Ok(value) = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        return Some(value);
    }

    let value = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(match Decimal::from_f64(value) {
        Some(d) => d,
        None if value.abs() < 1.0 => Decimal::ZERO,
        None if value < 0.0 => Decimal::MIN,
        None => Decimal::MAX,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_scientific_notation() {
        assert_eq!(parse_decimal("60"), Some(Decimal::new(60, 0)));
        assert_eq!(parse_decimal("70.5"), Some(Decimal::new(705, 1)));
        assert_eq!(parse_decimal("2.5e1"), Some(Decimal::new(25, 0)));
        assert_eq!(parse_decimal("-3"), Some(Decimal::new(-3, 0)));
    }

    #[test]
    fn oversized_numbers_saturate_by_sign() {
        assert_eq!(parse_decimal("1e30"), Some(Decimal::MAX));
        assert_eq!(parse_decimal("-1e30"), Some(Decimal::MIN));
        assert_eq!(
            parse_decimal("100000000000000000000000000000000"),
            Some(Decimal::MAX)
        );
    }

    #[test]
    fn non_numbers_are_rejected() {
        for raw in ["", "abc", "NaN", "inf", "-infinity", "1e400", "12abc"] {
            assert_eq!(parse_decimal(raw), None, "{raw:?} should not parse");
        }
    }
}
