//! Single USD/INR rate lookup.

use std::sync::Arc;

use ratewatch_common::{CurrencyPair, FxRate};
use tracing::{debug, instrument};

use crate::error::{FxError, FxResult};
use crate::provider::RateProvider;

/// Looks up the USD/INR rate from a provider and checks it is usable.
#[derive(Clone)]
pub struct RateFetcher {
    provider: Arc<dyn RateProvider>,
    pair: CurrencyPair,
}

impl RateFetcher {
    /// Create a fetcher for USD/INR.
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self {
            provider,
            pair: CurrencyPair::usd_inr(),
        }
    }

    /// The pair being fetched.
    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetch the current rate.
    #[instrument(skip(self), fields(provider = self.provider.name(), pair = %self.pair))]
    pub async fn fetch(&self) -> FxResult<FxRate> {
        let rate = self.provider.get_rate(&self.pair).await?;

        if rate.pair != self.pair {
            return Err(FxError::InvalidPayload(format!(
                "provider answered for {} instead of {}",
                rate.pair, self.pair
            )));
        }

        if !rate.is_usable() {
            return Err(FxError::NonPositiveRate {
                pair: self.pair,
                rate: rate.rate,
            });
        }

        debug!(rate = %rate.rate, source = %rate.source, "Fetched rate");
        Ok(rate)
    }
}
