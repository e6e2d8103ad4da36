//! Periodic rate refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::widget::ConverterWidget;

/// Refreshes a widget's rate immediately and then once per interval.
///
/// Call [`RefreshScheduler::stop`] on teardown. Dropping the scheduler
/// without stopping it aborts the task.
pub struct RefreshScheduler {
    interval: Duration,
    shutdown_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Spawn the refresh task. `interval` must be non-zero.
    pub fn start(widget: Arc<ConverterWidget>, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    _ = shutdown_rx.recv() => break,
                    _ = ticker.tick() => {
                        debug!("Scheduled rate refresh");
                        widget.refresh().await;
                    }
                }
            }

            debug!("Refresh task exited");
        });

        info!(interval_ms = interval.as_millis() as u64, "Refresh scheduler started");

        Self {
            interval,
            shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Time between scheduled refreshes.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the refresh task is still alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop scheduling refreshes and wait for the task to exit.
    ///
    /// A refresh already in flight is allowed to finish.
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(()).await;

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Refresh task ended abnormally");
            }
        }

        info!("Refresh scheduler stopped");
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConversionState;
    use ratewatch_fx::{MockRateProvider, RateFetcher};
    use rust_decimal_macros::dec;

    const FIVE_MINUTES: Duration = Duration::from_millis(300_000);

    fn setup() -> (Arc<MockRateProvider>, Arc<ConverterWidget>) {
        let provider = Arc::new(MockRateProvider::new("mock"));
        provider.set_rate(dec!(83));
        let widget = Arc::new(ConverterWidget::new(
            RateFetcher::new(provider.clone()),
            ConversionState::default(),
        ));
        (provider, widget)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_on_start_and_each_interval() {
        let (provider, widget) = setup();
        let mut calls = provider.on_call();
        let started = tokio::time::Instant::now();

        let scheduler = RefreshScheduler::start(widget.clone(), FIVE_MINUTES);

        assert_eq!(calls.recv().await, Some(1));
        assert!(started.elapsed() < Duration::from_secs(1));

        assert_eq!(calls.recv().await, Some(2));
        assert!(started.elapsed() >= FIVE_MINUTES);

        assert_eq!(calls.recv().await, Some(3));
        assert!(started.elapsed() >= FIVE_MINUTES * 2);

        scheduler.stop().await;
        assert_eq!(widget.snapshot().rate(), Some(dec!(83)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_fetch_after_stop() {
        let (provider, widget) = setup();
        let mut calls = provider.on_call();

        let scheduler = RefreshScheduler::start(widget, FIVE_MINUTES);
        assert_eq!(calls.recv().await, Some(1));
        assert!(scheduler.is_running());

        scheduler.stop().await;

        let next = tokio::time::timeout(FIVE_MINUTES * 3, calls.recv()).await;
        assert!(next.is_err());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let (provider, widget) = setup();
        let mut calls = provider.on_call();

        let scheduler = RefreshScheduler::start(widget, FIVE_MINUTES);
        assert_eq!(scheduler.interval(), FIVE_MINUTES);
        assert_eq!(calls.recv().await, Some(1));

        drop(scheduler);

        let next = tokio::time::timeout(FIVE_MINUTES * 3, calls.recv()).await;
        assert!(next.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_waits_for_in_flight_fetch() {
        let (provider, widget) = setup();
        let mut calls = provider.on_call();
        provider.hold();

        let scheduler = RefreshScheduler::start(widget.clone(), FIVE_MINUTES);
        assert_eq!(calls.recv().await, Some(1));
        assert!(widget.snapshot().is_fetching());

        let stopping = tokio::spawn(scheduler.stop());
        tokio::task::yield_now().await;
        assert!(!stopping.is_finished());

        provider.release();
        stopping.await.unwrap();

        let state = widget.snapshot();
        assert!(!state.is_fetching());
        assert_eq!(state.rate(), Some(dec!(83)));
    }
}
