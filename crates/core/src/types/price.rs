//! Money amounts using decimal arithmetic.
//!
//! Stored entities keep bare [`Decimal`] amounts (the persisted JSON has no
//! currency field). [`Price`] wraps an amount for US dollar display and cent
//! rounding; the storefront sells in one currency only.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

/// A US dollar amount, formatted as `$12.34`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    /// Amount in dollars, not cents.
    pub amount: Decimal,
}

impl Price {
    /// Wrap a dollar amount for display.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Round an amount to whole cents, halves away from zero.
    #[must_use]
    pub fn round_to_cents(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = Self::round_to_cents(self.amount);
        write!(f, "${rounded:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::usd(Decimal::new(50, 0)).to_string(), "$50.00");
        assert_eq!(Price::usd(Decimal::new(29999, 2)).to_string(), "$299.99");
        assert_eq!(Price::usd(Decimal::new(1_005, 3)).to_string(), "$1.01");
    }

    #[test]
    fn test_round_to_cents_half_away_from_zero() {
        assert_eq!(
            Price::round_to_cents(Decimal::new(23_9992, 4)),
            Decimal::new(2400, 2)
        );
        assert_eq!(
            Price::round_to_cents(Decimal::new(1_005, 3)),
            Decimal::new(101, 2)
        );
    }
}
