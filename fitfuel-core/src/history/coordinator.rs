//! Fetch → transform → publish for the history screen.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::analytics;
use crate::client::AnalyticsService;
use crate::error::Result;
use crate::types::{AnalyticsPayload, TimePeriod};

use super::state::ViewState;

/// Owns the history [`ViewState`] and the request that feeds it.
///
/// Only the most recently started request can publish: starting a new load
/// aborts the in-flight one, and every publish is checked against a request
/// generation while the state lock is held.
///
/// [`load`](Self::load), [`refresh`](Self::refresh) and
/// [`cancel`](Self::cancel) spawn or abort Tokio tasks, so they must be called
/// from within a Tokio runtime.
pub struct HistoryCoordinator<S: AnalyticsService> {
    service: Arc<S>,
    state: Arc<watch::Sender<ViewState>>,
    /// Generation of the newest request; bumped by load and cancel
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    last_period: Mutex<TimePeriod>,
}

impl<S: AnalyticsService> HistoryCoordinator<S> {
    /// Create a coordinator. `default_period` is what [`refresh`](Self::refresh)
    /// loads before any explicit [`load`](Self::load).
    pub fn new(service: S, default_period: TimePeriod) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            service: Arc::new(service),
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
            last_period: Mutex::new(default_period),
        }
    }

    /// Subscribe to state changes. The receiver always holds the latest state.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Period the next [`refresh`](Self::refresh) will load.
    pub fn current_period(&self) -> TimePeriod {
        *lock(&self.last_period)
    }

    /// Start loading `period`, replacing any request already in flight.
    pub fn load(&self, period: TimePeriod) {
        // Held until the new handle is stored; concurrent loads serialize here.
        let mut in_flight = lock(&self.in_flight);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *lock(&self.last_period) = period;
        abort(in_flight.take());

        let range = period.date_range(Utc::now());
        self.state.send_modify(|state| state.is_loading = true);

        tracing::info!(
            %period,
            generation,
            start = %range.start,
            end = %range.end,
            "Loading historical data"
        );

        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);

        *in_flight = Some(tokio::spawn(async move {
            let result = service
                .fetch_historical_data(range.start, range.end)
                .await;
            publish(&state, &current, generation, period, result);
        }));
    }

    /// Reload the last requested period.
    pub fn refresh(&self) {
        self.load(self.current_period());
    }

    /// Abort the in-flight request, if any, and clear the loading flag.
    pub fn cancel(&self) {
        let mut in_flight = lock(&self.in_flight);
        self.generation.fetch_add(1, Ordering::SeqCst);
        abort(in_flight.take());
        self.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });
    }

    /// Wait until no request is loading and return the resulting state.
    pub async fn wait_idle(&self) -> ViewState {
        let mut rx = self.subscribe();
        let state = match rx.wait_for(|state| !state.is_loading).await {
            Ok(state) => state.clone(),
            // The sender lives in self, so this only happens mid-teardown
            Err(_) => self.state(),
        };
        state
    }
}

impl<S: AnalyticsService> Drop for HistoryCoordinator<S> {
    fn drop(&mut self) {
        let mut in_flight = lock(&self.in_flight);
        self.generation.fetch_add(1, Ordering::SeqCst);
        abort(in_flight.take());
    }
}

fn abort(handle: Option<JoinHandle<()>>) {
    if let Some(handle) = handle {
        if !handle.is_finished() {
            tracing::debug!("Aborting superseded history request");
            handle.abort();
        }
    }
}

/// Apply a finished request to the state, unless a newer one has started.
fn publish(
    state: &watch::Sender<ViewState>,
    current: &AtomicU64,
    generation: u64,
    period: TimePeriod,
    result: Result<AnalyticsPayload>,
) {
    let published = match result {
        Ok(payload) => {
            let summary = analytics::summarize(&payload);
            let now = Utc::now();
            let insight_count = summary.insights.len();
            let published = state.send_if_modified(|view| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *view = ViewState::loaded(period, summary, now);
                true
            });
            if published {
                tracing::info!(
                    %period,
                    generation,
                    insights = insight_count,
                    "Historical data loaded"
                );
            }
            published
        }
        Err(e) => {
            let message = e.to_string();
            let published = state.send_if_modified(|view| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                view.fail(message);
                true
            });
            if published {
                tracing::warn!(
                    %period,
                    generation,
                    error = %e,
                    "Failed to load historical data"
                );
            }
            published
        }
    };

    if !published {
        tracing::debug!(%period, generation, "Discarding result of superseded request");
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
