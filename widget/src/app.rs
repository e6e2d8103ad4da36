//! Mount and unmount lifecycle.

use std::sync::Arc;

use ratewatch_fx::{ExchangeRateApi, FxResult, RateFetcher, RateProvider};
use tracing::info;

use crate::config::WidgetConfig;
use crate::scheduler::RefreshScheduler;
use crate::state::ConversionState;
use crate::widget::ConverterWidget;

/// A mounted widget together with its refresh timer.
///
/// Must be created inside a tokio runtime.
pub struct ConverterApp {
    widget: Arc<ConverterWidget>,
    scheduler: RefreshScheduler,
}

impl ConverterApp {
    /// Mount a widget backed by `provider` and start refreshing.
    pub fn mount(config: &WidgetConfig, provider: Arc<dyn RateProvider>) -> Self {
        let initial = ConversionState::new(config.initial_amount.clone(), config.initial_direction());
        let widget = Arc::new(ConverterWidget::new(RateFetcher::new(provider), initial));
        let scheduler = RefreshScheduler::start(widget.clone(), config.refresh_interval);

        info!(
            endpoint = %config.endpoint,
            direction = %config.initial_direction(),
            "Converter mounted"
        );

        Self { widget, scheduler }
    }

    /// Mount a widget that queries `config.endpoint` over HTTP.
    pub fn mount_http(config: &WidgetConfig) -> FxResult<Self> {
        let provider = ExchangeRateApi::new(config.endpoint.clone(), config.request_timeout)?;
        Ok(Self::mount(config, Arc::new(provider)))
    }

    /// The mounted widget.
    pub fn widget(&self) -> &Arc<ConverterWidget> {
        &self.widget
    }

    /// Stop the refresh timer and release the widget.
    pub async fn unmount(self) {
        self.scheduler.stop().await;
        info!("Converter unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratewatch_common::{Currency, Direction};
    use ratewatch_fx::MockRateProvider;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_mount_fetches_and_unmount_stops() {
        let provider = Arc::new(MockRateProvider::new("mock"));
        provider.set_rate(dec!(83.0));
        let mut calls = provider.on_call();

        let config = WidgetConfig {
            initial_amount: "100".to_string(),
            ..Default::default()
        };
        let app = ConverterApp::mount(&config, provider.clone());
        let mut updates = app.widget().subscribe();

        assert_eq!(calls.recv().await, Some(1));
        updates
            .wait_for(|state| state.converted_amount().is_some())
            .await
            .unwrap();
        assert_eq!(app.widget().snapshot().converted_amount(), Some(dec!(8300)));

        app.unmount().await;

        let next = tokio::time::timeout(Duration::from_secs(3600), calls.recv()).await;
        assert!(next.is_err());
    }

    #[tokio::test]
    async fn test_mount_uses_configured_direction() {
        let provider = Arc::new(MockRateProvider::new("mock"));
        let config = WidgetConfig {
            initial_from: Currency::Inr,
            ..Default::default()
        };

        let app = ConverterApp::mount(&config, provider);

        let state = app.widget().snapshot();
        assert_eq!(state.direction(), Direction::InrToUsd);
        assert_eq!(state.amount(), "1");

        app.unmount().await;
    }

    #[tokio::test]
    async fn test_mount_http() {
        let app = ConverterApp::mount_http(&WidgetConfig {
            endpoint: "http://127.0.0.1:9/latest".to_string(),
            request_timeout: Duration::from_secs(1),
            ..Default::default()
        })
        .unwrap();

        app.unmount().await;
    }
}
