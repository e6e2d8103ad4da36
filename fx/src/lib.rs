//! Ratewatch FX
//!
//! Rate lookup and conversion for the USD/INR converter widget.
//!
//! # Features
//!
//! - Pluggable rate providers behind [`RateProvider`]
//! - HTTP provider for the exchangerate-api `latest` endpoint
//! - Pure amount conversion in either direction
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ratewatch_common::Direction;
//! use ratewatch_fx::{ConversionEngine, ExchangeRateApi, RateFetcher};
//!
//! let fetcher = RateFetcher::new(Arc::new(ExchangeRateApi::with_defaults()?));
//! let rate = fetcher.fetch().await?;
//!
//! let inr = ConversionEngine::convert("100", Some(rate.rate), Direction::UsdToInr);
//! ```

pub mod conversion;
pub mod error;
pub mod exchange_rate_api;
pub mod fetcher;
pub mod provider;

pub use conversion::ConversionEngine;
pub use error::{FxError, FxResult, RATE_UNAVAILABLE_MESSAGE};
pub use exchange_rate_api::{ExchangeRateApi, LatestRates, DEFAULT_ENDPOINT};
pub use fetcher::RateFetcher;
pub use provider::RateProvider;

#[cfg(any(test, feature = "test-utils"))]
pub use provider::MockRateProvider;
