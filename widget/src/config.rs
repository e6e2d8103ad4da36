//! Widget configuration.

use std::time::Duration;

use ratewatch_common::{constants, Currency, Direction};
use ratewatch_fx::{ConversionEngine, DEFAULT_ENDPOINT};

use crate::state::DEFAULT_AMOUNT;

/// Main widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Rate lookup endpoint.
    pub endpoint: String,
    /// Time between scheduled refreshes.
    pub refresh_interval: Duration,
    /// Timeout for a single rate request.
    pub request_timeout: Duration,
    /// Amount shown at mount.
    pub initial_amount: String,
    /// Input-side currency at mount.
    pub initial_from: Currency,
    /// Log level used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit logs as JSON.
    pub json_logs: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            refresh_interval: constants::RATE_REFRESH_INTERVAL,
            request_timeout: constants::RATE_REQUEST_TIMEOUT,
            initial_amount: DEFAULT_AMOUNT.to_string(),
            initial_from: Currency::Usd,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("RATEWATCH_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Some(secs) = lookup("RATEWATCH_REFRESH_SECS") {
            if let Ok(secs) = secs.parse() {
                config.refresh_interval = Duration::from_secs(secs);
            }
        }

        if let Some(secs) = lookup("RATEWATCH_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Direction at mount.
    pub fn initial_direction(&self) -> Direction {
        Direction::from_source(self.initial_from)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("Endpoint cannot be empty".to_string());
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!("Endpoint must be an http(s) URL: {}", self.endpoint));
        }

        if self.refresh_interval.is_zero() {
            return Err("Refresh interval cannot be zero".to_string());
        }

        if self.request_timeout.is_zero() {
            return Err("Request timeout cannot be zero".to_string());
        }

        if ConversionEngine::parse_amount(&self.initial_amount).is_none() {
            return Err(format!("Initial amount is not a number: {}", self.initial_amount));
        }

        Ok(())
    }
}
