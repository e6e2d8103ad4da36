//! Error types for shared ratewatch types.

use thiserror::Error;

/// Error returned when a currency code is not one of the supported currencies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported currency: {0}")]
pub struct ParseCurrencyError(pub String);
