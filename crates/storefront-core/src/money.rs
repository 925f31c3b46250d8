//! # Money Module
//!
//! The decimal accumulator: every cart and line-item total in the system is a
//! decimal **text** value, and every mutation adds a signed delta to it.
//!
//! ## Why Decimal Text?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: decimal text + rust_decimal                              │
//! │    "0.1" + 0.2 = "0.3"              ✅ exact fixed-point addition       │
//! │                                                                         │
//! │  Totals are never recomputed from scratch; they are accumulated one    │
//! │  signed delta at a time, so the representation must be exact.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money;
//!
//! let delta = money::line_delta("10.50", 3);          // price × qty
//! let total = money::add_to_total("0", delta);        // "31.50"
//! assert_eq!(total, "31.50");
//! ```

use rust_decimal::Decimal;

/// The total every cart starts with.
pub const ZERO_TOTAL: &str = "0";

/// Adds a signed delta to a decimal-text total and renders the result.
///
/// ## Precondition
/// `base` must be a well-formed decimal string. Every total in the system is
/// produced by this function or set to [`ZERO_TOTAL`], so the caller
/// guarantees this by construction; it is not validated defensively.
///
/// ## Panics
/// Panics if `base` is not a well-formed decimal string.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use storefront_core::money::add_to_total;
///
/// assert_eq!(add_to_total("30", Decimal::from(20)), "50");
/// assert_eq!(add_to_total("50", Decimal::from(-50)), "0");
/// ```
pub fn add_to_total(base: &str, delta: Decimal) -> String {
    let base: Decimal = base.parse().expect("total is a well-formed decimal");
    (base + delta).to_string()
}

/// Computes `price × qty` as an exact decimal delta.
///
/// The result feeds [`add_to_total`]; negate it for removals.
///
/// ## Panics
/// Panics if `price` is not a well-formed decimal string. Product prices are
/// validated at catalog creation, so stored prices are well-formed by
/// construction.
pub fn line_delta(price: &str, qty: i64) -> Decimal {
    let price: Decimal = price.parse().expect("price is a well-formed decimal");
    price * Decimal::from(qty)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn add_to_total_is_exact() {
        // The classic float failure case stays exact here
        assert_eq!(add_to_total("0.1", dec!(0.2)), "0.3");
    }

    #[test]
    fn add_to_total_accepts_negative_deltas() {
        assert_eq!(add_to_total("30", dec!(-10)), "20");
        assert_eq!(add_to_total("30", dec!(-30)), "0");
    }

    #[test]
    fn line_delta_multiplies_price_by_qty() {
        assert_eq!(line_delta("10", 3), dec!(30));
        assert_eq!(line_delta("2.99", 3), dec!(8.97));
    }

    #[test]
    fn accumulation_matches_recomputation() {
        // Repeated accumulation of the same delta never drifts
        let mut total = ZERO_TOTAL.to_string();
        for _ in 0..100 {
            total = add_to_total(&total, dec!(0.10));
        }
        assert_eq!(total.parse::<Decimal>().unwrap(), dec!(10.00));
    }

    #[test]
    #[should_panic(expected = "well-formed decimal")]
    fn add_to_total_panics_on_malformed_base() {
        add_to_total("not-a-number", dec!(1));
    }
}
