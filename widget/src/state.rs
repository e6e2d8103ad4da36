//! Converter form state.

use ratewatch_common::{Currency, Direction, FxRate, Timestamp};
use ratewatch_fx::ConversionEngine;
use rust_decimal::Decimal;

/// Amount shown when the widget first mounts.
pub const DEFAULT_AMOUNT: &str = "1";

/// Everything the converter screen displays.
///
/// `converted_amount` has no setter. It is re-derived at the end of every
/// mutation that touches the amount, the rate or the direction. When the
/// amount does not parse or no rate is known, the previous value is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionState {
    amount: String,
    direction: Direction,
    rate: Option<Decimal>,
    converted_amount: Option<Decimal>,
    last_updated: Option<Timestamp>,
    error: Option<String>,
    is_fetching: bool,
}

impl ConversionState {
    /// Create the state a freshly mounted widget starts with.
    pub fn new(amount: impl Into<String>, direction: Direction) -> Self {
        Self {
            amount: amount.into(),
            direction,
            rate: None,
            converted_amount: None,
            last_updated: None,
            error: None,
            is_fetching: false,
        }
    }

    /// Raw text of the amount field.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Currency of the amount field.
    pub fn from_currency(&self) -> Currency {
        self.direction.from()
    }

    /// Currency of the converted amount.
    pub fn to_currency(&self) -> Currency {
        self.direction.to()
    }

    /// Last successfully fetched INR-per-USD rate.
    pub fn rate(&self) -> Option<Decimal> {
        self.rate
    }

    /// Derived conversion result.
    pub fn converted_amount(&self) -> Option<Decimal> {
        self.converted_amount
    }

    /// When the rate was last fetched successfully.
    pub fn last_updated(&self) -> Option<Timestamp> {
        self.last_updated
    }

    /// User-facing error from the last fetch, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a fetch is in flight.
    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    /// Replace the amount field.
    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
        self.recompute();
    }

    /// Mark a fetch as started. Clears the previous error.
    pub fn begin_fetch(&mut self) {
        self.error = None;
        self.is_fetching = true;
    }

    /// Record a successful fetch.
    pub fn apply_rate(&mut self, rate: &FxRate) {
        self.rate = Some(rate.rate);
        self.last_updated = Some(rate.quoted_at);
        self.is_fetching = false;
        self.recompute();
    }

    /// Record a failed fetch. The previous rate stays in place.
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.is_fetching = false;
    }

    /// Reverse the direction, carrying the converted amount into the input.
    pub fn swap(&mut self) {
        let carried = self.converted_amount.map(ConversionEngine::carry_over);

        self.direction = self.direction.swapped();
        if let Some(amount) = carried {
            self.amount = amount;
        }

        self.recompute();
    }

    fn recompute(&mut self) {
        if let Some(converted) = ConversionEngine::convert(&self.amount, self.rate, self.direction) {
            self.converted_amount = Some(converted);
        }
    }
}

impl Default for ConversionState {
    fn default() -> Self {
        Self::new(DEFAULT_AMOUNT, Direction::default())
    }
}
