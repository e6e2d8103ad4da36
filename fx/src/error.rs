//! FX error types.

use ratewatch_common::CurrencyPair;
use rust_decimal::Decimal;
use thiserror::Error;

/// The one message users see for any failed rate fetch.
pub const RATE_UNAVAILABLE_MESSAGE: &str =
    "Failed to fetch exchange rate. Please try again later.";

/// Errors that can occur while obtaining a rate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    /// Request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status.
    #[error("Rate endpoint returned HTTP {0}")]
    HttpStatus(u16),

    /// Body was not the expected JSON shape.
    #[error("Invalid rate payload: {0}")]
    InvalidPayload(String),

    /// Payload had no entry for the requested pair.
    #[error("Rate not available for {0}")]
    RateNotAvailable(CurrencyPair),

    /// Payload carried a zero or negative rate.
    #[error("Non-positive rate {rate} for {pair}")]
    NonPositiveRate { pair: CurrencyPair, rate: Decimal },

    /// Provider does not quote this pair.
    #[error("Unsupported currency pair: {0}")]
    UnsupportedPair(CurrencyPair),
}

impl FxError {
    /// Get error code for structured logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            FxError::Network(_) => "NETWORK_ERROR",
            FxError::HttpStatus(_) => "HTTP_STATUS",
            FxError::InvalidPayload(_) => "INVALID_PAYLOAD",
            FxError::RateNotAvailable(_) => "RATE_NOT_AVAILABLE",
            FxError::NonPositiveRate { .. } => "NON_POSITIVE_RATE",
            FxError::UnsupportedPair(_) => "UNSUPPORTED_PAIR",
        }
    }

    /// Message to surface to the user.
    ///
    /// Every fetch failure collapses into the same "rate unavailable" text;
    /// the detail goes to the logs.
    pub fn user_message(&self) -> &'static str {
        RATE_UNAVAILABLE_MESSAGE
    }
}

impl From<reqwest::Error> for FxError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FxError::HttpStatus(status.as_u16())
        } else if err.is_decode() {
            FxError::InvalidPayload(err.to_string())
        } else {
            FxError::Network(err.to_string())
        }
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
