//! The converter widget: shared state plus its event handlers.

use parking_lot::RwLock;
use ratewatch_fx::RateFetcher;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

use crate::state::ConversionState;

/// One mounted converter.
///
/// Event handlers mutate the state under a short write lock and publish a
/// snapshot to subscribers. The lock is never held across the network call.
pub struct ConverterWidget {
    state: RwLock<ConversionState>,
    fetcher: RateFetcher,
    updates: watch::Sender<ConversionState>,
}

impl ConverterWidget {
    /// Create a widget with the given starting state.
    pub fn new(fetcher: RateFetcher, initial: ConversionState) -> Self {
        let (updates, _) = watch::channel(initial.clone());

        Self {
            state: RwLock::new(initial),
            fetcher,
            updates,
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ConversionState {
        self.state.read().clone()
    }

    /// Receive a snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<ConversionState> {
        self.updates.subscribe()
    }

    /// Handle an edit of the amount field.
    pub fn set_amount(&self, amount: impl Into<String>) {
        self.update(|state| state.set_amount(amount));
    }

    /// Handle the swap control.
    pub fn swap(&self) {
        let direction = self.update(|state| {
            state.swap();
            state.direction()
        });
        debug!(direction = %direction, "Swapped direction");
    }

    /// Fetch the rate unconditionally. Used by the scheduler.
    pub async fn refresh(&self) {
        self.update(ConversionState::begin_fetch);
        self.run_fetch().await;
    }

    /// Handle the manual refresh control.
    ///
    /// Ignored while a fetch is in flight, the same as a disabled button.
    /// Returns whether a fetch ran.
    pub async fn request_refresh(&self) -> bool {
        let started = self.update(|state| {
            if state.is_fetching() {
                false
            } else {
                state.begin_fetch();
                true
            }
        });

        if !started {
            debug!("Refresh already in progress");
            return false;
        }

        self.run_fetch().await;
        true
    }

    #[instrument(skip(self), fields(provider = self.fetcher.provider_name()))]
    async fn run_fetch(&self) {
        match self.fetcher.fetch().await {
            Ok(rate) => {
                info!(rate = %rate.rate, pair = %rate.pair, "Exchange rate updated");
                self.update(|state| state.apply_rate(&rate));
            }
            Err(e) => {
                error!(
                    error = %e,
                    error_code = e.error_code(),
                    "Error fetching exchange rate"
                );
                self.update(|state| state.fail_fetch(e.user_message()));
            }
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut ConversionState) -> R) -> R {
        let mut state = self.state.write();
        let result = f(&mut state);
        self.updates.send_replace(state.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratewatch_common::Direction;
    use ratewatch_fx::{FxError, MockRateProvider, RATE_UNAVAILABLE_MESSAGE};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn setup(rate: Option<rust_decimal::Decimal>) -> (Arc<MockRateProvider>, Arc<ConverterWidget>) {
        let provider = Arc::new(MockRateProvider::new("mock"));
        if let Some(rate) = rate {
            provider.set_rate(rate);
        }
        let widget = Arc::new(ConverterWidget::new(
            RateFetcher::new(provider.clone()),
            ConversionState::new("100", Direction::UsdToInr),
        ));
        (provider, widget)
    }

    #[tokio::test]
    async fn test_refresh_applies_rate() {
        let (_, widget) = setup(Some(dec!(83.0)));

        widget.refresh().await;

        let state = widget.snapshot();
        assert_eq!(state.rate(), Some(dec!(83.0)));
        assert_eq!(state.converted_amount(), Some(dec!(8300)));
        assert!(state.last_updated().is_some());
        assert!(!state.is_fetching());
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_rate() {
        let (provider, widget) = setup(Some(dec!(83.0)));
        widget.refresh().await;

        provider.fail_with(FxError::RateNotAvailable(ratewatch_common::CurrencyPair::usd_inr()));
        widget.refresh().await;

        let state = widget.snapshot();
        assert_eq!(state.error(), Some(RATE_UNAVAILABLE_MESSAGE));
        assert_eq!(state.rate(), Some(dec!(83.0)));
        assert!(!state.is_fetching());
    }

    #[tokio::test]
    async fn test_failed_first_refresh_leaves_widget_usable() {
        let (provider, widget) = setup(None);

        widget.refresh().await;
        assert_eq!(widget.snapshot().error(), Some(RATE_UNAVAILABLE_MESSAGE));
        assert_eq!(widget.snapshot().converted_amount(), None);

        provider.set_rate(dec!(80));
        assert!(widget.request_refresh().await);

        let state = widget.snapshot();
        assert_eq!(state.error(), None);
        assert_eq!(state.converted_amount(), Some(dec!(8000)));
    }

    #[tokio::test]
    async fn test_busy_flag_during_fetch() {
        let (provider, widget) = setup(Some(dec!(83)));
        let mut calls = provider.on_call();
        provider.hold();

        let task = {
            let widget = widget.clone();
            tokio::spawn(async move { widget.refresh().await })
        };
        calls.recv().await;

        assert!(widget.snapshot().is_fetching());

        provider.release();
        task.await.unwrap();

        assert!(!widget.snapshot().is_fetching());
    }

    #[tokio::test]
    async fn test_manual_refresh_ignored_while_busy() {
        let (provider, widget) = setup(Some(dec!(83)));
        provider.hold();

        let mut first = tokio_test::task::spawn(widget.request_refresh());
        tokio_test::assert_pending!(first.poll());
        assert!(widget.snapshot().is_fetching());

        assert!(!widget.request_refresh().await);
        assert_eq!(provider.calls(), 1);

        provider.release();
        assert!(tokio_test::assert_ready!(first.poll()));
        assert_eq!(widget.snapshot().rate(), Some(dec!(83)));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (_, widget) = setup(Some(dec!(83)));
        let mut updates = widget.subscribe();

        widget.set_amount("2");
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().amount(), "2");

        widget.refresh().await;
        widget.swap();
        updates.changed().await.unwrap();

        let latest = updates.borrow_and_update().clone();
        assert_eq!(latest.direction(), Direction::InrToUsd);
        assert_eq!(latest.amount(), "166.00");
    }
}
