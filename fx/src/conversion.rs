//! Amount conversion between USD and INR.

use std::str::FromStr;

use ratewatch_common::{to_fixed, Direction};
use rust_decimal::Decimal;

/// Decimal places used when a converted amount is carried into the input.
pub const CARRY_OVER_PLACES: u32 = 2;

/// Pure conversion rules. `rate` is always INR per USD.
pub struct ConversionEngine;

impl ConversionEngine {
    /// Parse user input as a number.
    ///
    /// Accepts plain and scientific notation after trimming. Returns `None`
    /// for anything else, including empty input.
    pub fn parse_amount(input: &str) -> Option<Decimal> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
    }

    /// Convert raw input. `None` means no conversion can be produced.
    pub fn convert(amount: &str, rate: Option<Decimal>, direction: Direction) -> Option<Decimal> {
        let rate = rate?;
        let amount = Self::parse_amount(amount)?;
        Self::convert_value(amount, rate, direction)
    }

    /// Convert a parsed amount.
    ///
    /// USD to INR multiplies by the rate, INR to USD divides by it. A
    /// non-positive rate or an overflowing result yields `None`.
    pub fn convert_value(amount: Decimal, rate: Decimal, direction: Direction) -> Option<Decimal> {
        if rate <= Decimal::ZERO {
            return None;
        }

        match direction {
            Direction::UsdToInr => amount.checked_mul(rate),
            Direction::InrToUsd => amount.checked_div(rate),
        }
    }

    /// Text placed in the amount field when the direction is swapped.
    pub fn carry_over(converted: Decimal) -> String {
        to_fixed(converted, CARRY_OVER_PLACES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_to_inr() {
        let converted = ConversionEngine::convert("100", Some(dec!(83.0)), Direction::UsdToInr);

        assert_eq!(converted, Some(dec!(8300)));
        assert_eq!(ConversionEngine::carry_over(converted.unwrap()), "8300.00");
    }

    #[test]
    fn test_inr_to_usd() {
        let converted = ConversionEngine::convert("8300", Some(dec!(83)), Direction::InrToUsd);

        assert_eq!(converted, Some(dec!(100)));
    }

    #[test]
    fn test_no_rate_no_conversion() {
        assert_eq!(ConversionEngine::convert("100", None, Direction::UsdToInr), None);
    }

    #[test]
    fn test_invalid_amount() {
        for input in ["abc", "", "   ", "12abc", "1,000"] {
            assert_eq!(
                ConversionEngine::convert(input, Some(dec!(83)), Direction::UsdToInr),
                None,
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_amount_forms() {
        assert_eq!(ConversionEngine::parse_amount(" 42.5 "), Some(dec!(42.5)));
        assert_eq!(ConversionEngine::parse_amount("1e3"), Some(dec!(1000)));
        assert_eq!(ConversionEngine::parse_amount("-2"), Some(dec!(-2)));
    }

    #[test]
    fn test_zero_rate_no_conversion() {
        assert_eq!(
            ConversionEngine::convert_value(dec!(1), Decimal::ZERO, Direction::InrToUsd),
            None
        );
    }

    #[test]
    fn test_overflow_no_conversion() {
        assert_eq!(
            ConversionEngine::convert_value(Decimal::MAX, dec!(83), Direction::UsdToInr),
            None
        );
    }

    #[test]
    fn test_carry_over_rounds() {
        assert_eq!(ConversionEngine::carry_over(dec!(1.204819277)), "1.20");
        assert_eq!(ConversionEngine::carry_over(dec!(0.125)), "0.13");
    }

    proptest! {
        #[test]
        fn round_trip_returns_original(cents in 1u64..100_000_000_000, rate_bp in 1u64..10_000_000) {
            let amount = Decimal::new(cents as i64, 2);
            let rate = Decimal::new(rate_bp as i64, 4);

            let inr = ConversionEngine::convert_value(amount, rate, Direction::UsdToInr).unwrap();
            let back = ConversionEngine::convert_value(inr, rate, Direction::InrToUsd).unwrap();

            prop_assert!((back - amount).abs() <= dec!(0.000001));
        }
    }
}
