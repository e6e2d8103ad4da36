//! Monetary types for ratewatch.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseCurrencyError;
use crate::time::{now, Timestamp};

/// One of the two currencies the widget converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar.
    Usd,
    /// Indian rupee.
    Inr,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Inr];

    /// Get the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
        }
    }

    /// Get the display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }

    /// Get the standard decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// The other supported currency.
    pub fn counterpart(&self) -> Currency {
        match self {
            Currency::Usd => Currency::Inr,
            Currency::Inr => Currency::Usd,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "INR" => Ok(Currency::Inr),
            _ => Err(ParseCurrencyError(s.to_string())),
        }
    }
}

/// Which currency is entered and which one is displayed.
///
/// Only two directions exist, so the source and target can never be equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Amount is in USD, result in INR.
    #[default]
    UsdToInr,
    /// Amount is in INR, result in USD.
    InrToUsd,
}

impl Direction {
    /// Direction whose input side is `from`.
    pub fn from_source(from: Currency) -> Self {
        match from {
            Currency::Usd => Direction::UsdToInr,
            Currency::Inr => Direction::InrToUsd,
        }
    }

    /// Input-side currency.
    pub fn from(&self) -> Currency {
        match self {
            Direction::UsdToInr => Currency::Usd,
            Direction::InrToUsd => Currency::Inr,
        }
    }

    /// Output-side currency.
    pub fn to(&self) -> Currency {
        self.from().counterpart()
    }

    /// The opposite direction.
    pub fn swapped(&self) -> Self {
        match self {
            Direction::UsdToInr => Direction::InrToUsd,
            Direction::InrToUsd => Direction::UsdToInr,
        }
    }

    /// The currency pair read in this direction.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from(), self.to())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from(), self.to())
    }
}

/// A currency pair for FX operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Base currency.
    pub base: Currency,
    /// Quote currency (pricing currency).
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// The pair the widget quotes: USD priced in INR.
    pub fn usd_inr() -> Self {
        Self::new(Currency::Usd, Currency::Inr)
    }

    /// Get the inverse pair.
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// A quoted rate: one unit of `pair.base` is worth `rate` units of `pair.quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxRate {
    /// The currency pair.
    pub pair: CurrencyPair,
    /// Quote-currency units per base-currency unit.
    pub rate: Decimal,
    /// When this rate was obtained.
    pub quoted_at: Timestamp,
    /// Rate source.
    pub source: String,
}

impl FxRate {
    /// Create a rate quoted now.
    pub fn new(pair: CurrencyPair, rate: Decimal, source: impl Into<String>) -> Self {
        Self {
            pair,
            rate,
            quoted_at: now(),
            source: source.into(),
        }
    }

    /// Check that the rate can be used as a multiplier and a divisor.
    pub fn is_usable(&self) -> bool {
        self.rate > Decimal::ZERO
    }
}

/// A monetary amount with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount value.
    pub value: Decimal,
    /// Currency of the amount.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money instance.
    pub fn new(value: Decimal, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Round to the currency's standard decimal places.
    pub fn round(&self) -> Self {
        Self {
            value: round_half_up(self.value, self.currency.decimal_places()),
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}",
            self.currency.symbol(),
            to_fixed(self.value, self.currency.decimal_places()),
            self.currency
        )
    }
}

fn round_half_up(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Format `value` with exactly `places` fractional digits.
pub fn to_fixed(value: Decimal, places: u32) -> String {
    let mut rounded = round_half_up(value, places);
    rounded.rescale(places);
    rounded.to_string()
}
