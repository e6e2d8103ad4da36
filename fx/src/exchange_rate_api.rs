//! Rate provider backed by the public exchangerate-api `latest` endpoint.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use ratewatch_common::{constants, Currency, CurrencyPair, FxRate};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{FxError, FxResult};
use crate::provider::RateProvider;

/// Fixed lookup endpoint; rates are quoted against USD.
pub const DEFAULT_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest/USD";

const PROVIDER_NAME: &str = "exchangerate-api";

/// Body of a `latest` response.
///
/// Only `rates` is required. Entries for currencies other than the one
/// asked for are never inspected, so odd values there do not fail a lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestRates {
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub rates: Option<HashMap<String, Value>>,
}

impl LatestRates {
    /// Parse a response body.
    pub fn from_json(body: &str) -> FxResult<Self> {
        serde_json::from_str(body).map_err(|e| FxError::InvalidPayload(e.to_string()))
    }

    /// Extract the rate for `pair` (base must be the payload's base).
    pub fn rate_for(&self, pair: &CurrencyPair) -> FxResult<Decimal> {
        if let Some(base) = &self.base {
            if !base.eq_ignore_ascii_case(pair.base.code()) {
                return Err(FxError::InvalidPayload(format!(
                    "expected base {}, got {}",
                    pair.base, base
                )));
            }
        }

        let rates = self
            .rates
            .as_ref()
            .ok_or_else(|| FxError::InvalidPayload("missing rates".to_string()))?;

        let value = rates
            .get(pair.quote.code())
            .ok_or(FxError::RateNotAvailable(*pair))?;

        let rate = match value {
            Value::Number(number) => parse_number(&number.to_string()),
            _ => None,
        }
        .ok_or_else(|| {
            FxError::InvalidPayload(format!("rate for {} is not a number: {}", pair, value))
        })?;

        if rate <= Decimal::ZERO {
            return Err(FxError::NonPositiveRate { pair: *pair, rate });
        }

        Ok(rate)
    }
}

fn parse_number(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// HTTP rate provider for exchangerate-api.com.
pub struct ExchangeRateApi {
    client: reqwest::Client,
    endpoint: String,
}

impl ExchangeRateApi {
    /// Create a provider for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> FxResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FxError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Create a provider for the fixed public endpoint.
    pub fn with_defaults() -> FxResult<Self> {
        Self::new(DEFAULT_ENDPOINT, constants::RATE_REQUEST_TIMEOUT)
    }

    /// The endpoint this provider queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and parse the latest rates.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn latest(&self) -> FxResult<LatestRates> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let latest = LatestRates::from_json(&body)?;

        debug!(
            base = latest.base.as_deref().unwrap_or("?"),
            date = latest.date.as_deref().unwrap_or("?"),
            "Fetched latest rates"
        );

        Ok(latest)
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn get_rate(&self, pair: &CurrencyPair) -> FxResult<FxRate> {
        if !self.supports_pair(pair) {
            return Err(FxError::UnsupportedPair(*pair));
        }

        let rate = self.latest().await?.rate_for(pair)?;
        Ok(FxRate::new(*pair, rate, PROVIDER_NAME))
    }

    fn supports_pair(&self, pair: &CurrencyPair) -> bool {
        pair.base == Currency::Usd && pair.quote != Currency::Usd
    }

    fn supported_pairs(&self) -> Vec<CurrencyPair> {
        vec![CurrencyPair::usd_inr()]
    }
}
