//! Decimal money helpers.
//!
//! All monetary amounts in the system are `rust_decimal::Decimal` values
//! in dollars. The storefront's pricing rules round half-up to two
//! decimal places, and the order in which intermediate amounts are
//! rounded is part of the order-totals contract, so the rounding
//! function lives here rather than at each call site.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount half-up to two decimal places.
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The extended total of one line item: unit price times quantity.
#[must_use]
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(dec!(5.998)), dec!(6.00));
        assert_eq!(round2(dec!(5.994)), dec!(5.99));
        assert_eq!(round2(dec!(5.995)), dec!(6.00));
    }

    #[test]
    fn test_round2_leaves_two_places_alone() {
        assert_eq!(round2(dec!(29.99)), dec!(29.99));
        assert_eq!(round2(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(dec!(29.99), 2), dec!(59.98));
        assert_eq!(line_total(dec!(9.99), 1), dec!(9.99));
        assert_eq!(line_total(dec!(14.99), 0), Decimal::ZERO);
    }

    #[test]
    fn test_tax_rounds_before_total() {
        // The order-totals contract: tax is rounded before it is summed.
        let subtotal = line_total(dec!(29.99), 2);
        let tax = round2(subtotal * dec!(0.1));
        assert_eq!(tax, dec!(6.00));

        let total = round2(subtotal + dec!(5.00) + tax);
        assert_eq!(total, dec!(70.98));
    }
}
