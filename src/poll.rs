//! Cancelable polling timer for live listings
//!
//! A [`Poller`] owns a tokio task that invokes a callback on a fixed
//! interval. It can be paused and resumed, and the task is aborted when the
//! poller is dropped, so a view that goes away never leaves a timer behind.

use futures::future::BoxFuture;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Interval used by the breaking-news view
pub const BREAKING_NEWS_POLL_INTERVAL: Duration = Duration::from_secs(90);

/// Callback invoked on each tick
pub type TickFn = Box<dyn FnMut() -> BoxFuture<'static, ()> + Send>;

/// Handle to a running polling task
///
/// # Example
///
/// ```rust,ignore
/// let poller = Poller::spawn(BREAKING_NEWS_POLL_INTERVAL, move || {
///     let view = view.clone();
///     Box::pin(async move { view.refresh().await })
/// });
/// poller.pause();
/// poller.resume();
/// drop(poller); // task aborted
/// ```
pub struct Poller {
    paused: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
    interval: Duration,
}

impl Poller {
    /// Start polling. The first tick fires one full `interval` from now.
    pub fn spawn<F>(interval: Duration, tick: F) -> Self
    where
        F: FnMut() -> BoxFuture<'static, ()> + Send + 'static,
    {
        let interval = interval.max(Duration::from_millis(1));
        let (paused, paused_rx) = watch::channel(false);
        let handle = tokio::spawn(run(interval, Box::new(tick), paused_rx));

        tracing::info!(interval_secs = interval.as_secs_f64(), "poller started");

        Self {
            paused,
            handle: Some(handle),
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop invoking the callback until [`resume`](Self::resume)
    pub fn pause(&self) {
        self.paused.send_replace(true);
    }

    /// Resume polling; the next tick is one full interval away
    pub fn resume(&self) {
        self.paused.send_replace(false);
    }

    pub fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    /// Whether the background task is still alive
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the task and wait for it to finish
    pub async fn shutdown(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
        tracing::info!("poller stopped");
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("poller dropped, task aborted");
        }
    }
}

async fn run(period: Duration, mut tick: TickFn, mut paused: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if *paused.borrow_and_update() {
            if paused.changed().await.is_err() {
                break;
            }
            if !*paused.borrow() {
                ticker.reset();
            }
            continue;
        }

        tokio::select! {
            _ = ticker.tick() => {
                tracing::debug!("poller tick");
                tick().await;
            }
            changed = paused.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
}
