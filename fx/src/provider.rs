//! Rate provider trait and test double.

use async_trait::async_trait;
use ratewatch_common::{CurrencyPair, FxRate};

use crate::error::FxResult;

/// Trait for FX rate providers.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Get rate for a currency pair.
    async fn get_rate(&self, pair: &CurrencyPair) -> FxResult<FxRate>;

    /// Check if this provider supports the given currency pair.
    fn supports_pair(&self, pair: &CurrencyPair) -> bool;

    /// Get all supported currency pairs.
    fn supported_pairs(&self) -> Vec<CurrencyPair>;
}

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockRateProvider;

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use parking_lot::Mutex;
    use rust_decimal::Decimal;
    use tokio::sync::{mpsc, Notify};

    use super::*;
    use crate::error::FxError;

    /// Scripted rate provider for tests.
    ///
    /// Answers every call with the currently configured outcome. Calls can be
    /// held open with [`MockRateProvider::hold`] to simulate a slow request.
    pub struct MockRateProvider {
        name: String,
        outcome: Mutex<FxResult<Decimal>>,
        calls: AtomicUsize,
        gate: Mutex<Option<Arc<Notify>>>,
        call_tx: Mutex<Option<mpsc::UnboundedSender<usize>>>,
    }

    impl MockRateProvider {
        /// Create a new mock provider that has no rate yet.
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                outcome: Mutex::new(Err(FxError::RateNotAvailable(CurrencyPair::usd_inr()))),
                calls: AtomicUsize::new(0),
                gate: Mutex::new(None),
                call_tx: Mutex::new(None),
            }
        }

        /// Answer subsequent calls with `rate`.
        pub fn set_rate(&self, rate: Decimal) {
            *self.outcome.lock() = Ok(rate);
        }

        /// Answer subsequent calls with `err`.
        pub fn fail_with(&self, err: FxError) {
            *self.outcome.lock() = Err(err);
        }

        /// Number of `get_rate` calls so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Make subsequent calls wait until [`MockRateProvider::release`].
        pub fn hold(&self) {
            *self.gate.lock() = Some(Arc::new(Notify::new()));
        }

        /// Stop holding calls.
        pub fn release(&self) {
            if let Some(gate) = self.gate.lock().take() {
                gate.notify_waiters();
                gate.notify_one();
            }
        }

        /// Receive the running call count each time `get_rate` is entered.
        pub fn on_call(&self) -> mpsc::UnboundedReceiver<usize> {
            let (tx, rx) = mpsc::unbounded_channel();
            *self.call_tx.lock() = Some(tx);
            rx
        }
    }

    #[async_trait]
    impl RateProvider for MockRateProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn get_rate(&self, pair: &CurrencyPair) -> FxResult<FxRate> {
            let count = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let call_tx = self.call_tx.lock().clone();
            if let Some(tx) = call_tx {
                let _ = tx.send(count);
            }

            let gate = self.gate.lock().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            let outcome = self.outcome.lock().clone();
            outcome.map(|rate| FxRate::new(*pair, rate, self.name.clone()))
        }

        fn supports_pair(&self, pair: &CurrencyPair) -> bool {
            *pair == CurrencyPair::usd_inr()
        }

        fn supported_pairs(&self) -> Vec<CurrencyPair> {
            vec![CurrencyPair::usd_inr()]
        }
    }
}
