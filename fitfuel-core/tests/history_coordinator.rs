//! Integration tests for the history coordinator
//!
//! These tests drive `HistoryCoordinator` against in-memory analytics
//! services to verify publishing, failure handling and the
//! cancel-and-replace request policy.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use fitfuel_core::analytics::{InsightKind, TrendDirection};
use fitfuel_core::client::AnalyticsService;
use fitfuel_core::history::HistoryCoordinator;
use fitfuel_core::{AnalyticsPayload, Error, NutritionalGap, Result, TimePeriod};

// ============================================
// Fake services
// ============================================

/// Answers each request with the next scripted response, immediately.
struct ScriptedService {
    responses: Mutex<VecDeque<Result<AnalyticsPayload>>>,
    ranges: Arc<Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>>,
}

impl ScriptedService {
    fn new(responses: Vec<Result<AnalyticsPayload>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ranges: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl AnalyticsService for ScriptedService {
    async fn fetch_historical_data(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AnalyticsPayload> {
        self.ranges.lock().unwrap().push((start, end));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("script exhausted".to_string())))
    }
}

/// Sleeps before answering; the nth request to start reports `n * 10` compliance.
struct SlowService {
    delay: Duration,
    started: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
}

impl SlowService {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: Arc::new(AtomicUsize::new(0)),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl AnalyticsService for SlowService {
    async fn fetch_historical_data(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<AnalyticsPayload> {
        let n = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);

        let mut payload = AnalyticsPayload::default();
        payload.compliance_trends.overall_compliance = n as f64 * 10.0;
        Ok(payload)
    }
}

fn rich_payload() -> AnalyticsPayload {
    let mut payload = AnalyticsPayload::default();
    payload.compliance_trends.overall_compliance = 86.0;
    payload.compliance_trends.trend = Some("improving".to_string());
    payload.timing_patterns.consistency_score = 0.9;
    payload.timing_patterns.trend = Some("slightly_declining".to_string());
    payload.nutritional_trends.gaps = vec![NutritionalGap {
        nutrient: "iron".to_string(),
    }];
    payload.recommendations = vec!["Add leafy greens to lunch".to_string()];
    payload
}

// ============================================
// Publishing
// ============================================

#[tokio::test]
async fn test_successful_load_publishes_summary() {
    fitfuel_core::logging::init_test();
    let history = HistoryCoordinator::new(
        ScriptedService::new(vec![Ok(rich_payload())]),
        TimePeriod::Week,
    );

    history.load(TimePeriod::Month);
    assert!(history.state().is_loading);

    let state = history.wait_idle().await;
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(state.period, Some(TimePeriod::Month));
    assert_eq!(state.average_compliance, 86.0);
    assert_eq!(state.consistency_score, 0.9);
    assert_eq!(state.compliance_trend, TrendDirection::Improving);
    assert_eq!(state.consistency_trend, TrendDirection::SlightlyDeclining);
    assert_eq!(state.recommendations, vec!["Add leafy greens to lunch"]);

    let kinds: Vec<_> = state.insights.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            InsightKind::Compliance,
            InsightKind::Nutrition,
            InsightKind::Timing
        ]
    );
}

#[tokio::test]
async fn test_subscriber_sees_loading_then_data() {
    let history = HistoryCoordinator::new(
        ScriptedService::new(vec![Ok(rich_payload())]),
        TimePeriod::Week,
    );
    let mut rx = history.subscribe();

    history.load(TimePeriod::Week);
    let state = rx
        .wait_for(|s| !s.is_loading && s.has_data())
        .await
        .unwrap()
        .clone();

    assert_eq!(state.average_compliance, 86.0);
}

#[tokio::test]
async fn test_load_requests_period_range() {
    let service = ScriptedService::new(vec![Ok(AnalyticsPayload::default())]);
    let ranges = Arc::clone(&service.ranges);
    let history = HistoryCoordinator::new(service, TimePeriod::Week);

    let before = Utc::now();
    history.load(TimePeriod::Week);
    history.wait_idle().await;
    let after = Utc::now();

    let ranges = ranges.lock().unwrap();
    assert_eq!(ranges.len(), 1);
    let (start, end) = ranges[0];
    assert!(end >= before && end <= after);
    assert_eq!(end - start, chrono::Duration::days(7));
}

#[tokio::test]
async fn test_reload_replaces_insights() {
    let mut second = AnalyticsPayload::default();
    second.timing_patterns.consistency_score = 0.95;

    let history = HistoryCoordinator::new(
        ScriptedService::new(vec![Ok(rich_payload()), Ok(second)]),
        TimePeriod::Week,
    );

    history.load(TimePeriod::Week);
    assert_eq!(history.wait_idle().await.insights.len(), 3);

    history.load(TimePeriod::Week);
    let state = history.wait_idle().await;
    assert_eq!(state.insights.len(), 1);
    assert_eq!(state.insights[0].kind, InsightKind::Timing);
    assert!(state.recommendations.is_empty());
}

// ============================================
// Failures
// ============================================

#[tokio::test]
async fn test_failure_after_success_keeps_data() {
    let history = HistoryCoordinator::new(
        ScriptedService::new(vec![
            Ok(rich_payload()),
            Err(Error::Server {
                status: 500,
                message: "internal error".to_string(),
            }),
        ]),
        TimePeriod::Week,
    );

    history.load(TimePeriod::Week);
    let loaded = history.wait_idle().await;

    history.refresh();
    let state = history.wait_idle().await;

    assert!(!state.is_loading);
    assert_eq!(
        state.error.as_deref(),
        Some("server error (500): internal error")
    );
    assert_eq!(state.average_compliance, loaded.average_compliance);
    assert_eq!(state.insights, loaded.insights);
    assert_eq!(state.updated_at, loaded.updated_at);
}

#[tokio::test]
async fn test_success_after_failure_clears_error() {
    let history = HistoryCoordinator::new(
        ScriptedService::new(vec![
            Err(Error::Decode("expected value at line 1".to_string())),
            Ok(rich_payload()),
        ]),
        TimePeriod::Year,
    );

    history.refresh();
    let failed = history.wait_idle().await;
    assert!(failed.error.is_some());
    assert!(!failed.has_data());

    // Coordinator stays usable after a failure
    history.refresh();
    let state = history.wait_idle().await;
    assert!(state.error.is_none());
    assert_eq!(state.period, Some(TimePeriod::Year));
    assert_eq!(state.average_compliance, 86.0);
}

// ============================================
// Cancel-and-replace
// ============================================

#[tokio::test]
async fn test_second_load_replaces_first() {
    fitfuel_core::logging::init_test();
    let service = SlowService::new(Duration::from_millis(100));
    let started = Arc::clone(&service.started);
    let completed = Arc::clone(&service.completed);
    let history = HistoryCoordinator::new(service, TimePeriod::Week);
    let mut rx = history.subscribe();

    history.load(TimePeriod::Week);
    history.load(TimePeriod::Week);

    let state = history.wait_idle().await;
    rx.mark_unchanged();

    // Give an aborted request time to (not) finish
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert!(!rx.has_changed().unwrap(), "a superseded result was published");
    assert!(state.error.is_none());

    // The nth request to start reports n * 10, so the published data came
    // from whichever request started last.
    let started = started.load(Ordering::SeqCst);
    assert!((1..=2).contains(&started));
    assert_eq!(state.average_compliance, started as f64 * 10.0);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_loads_leave_one_request_running() {
    for _ in 0..50 {
        let history = Arc::new(HistoryCoordinator::new(
            SlowService::new(Duration::from_millis(5)),
            TimePeriod::Week,
        ));
        let barrier = Arc::new(std::sync::Barrier::new(2));

        let callers: Vec<_> = (0..2)
            .map(|_| {
                let history = Arc::clone(&history);
                let barrier = Arc::clone(&barrier);
                tokio::task::spawn_blocking(move || {
                    barrier.wait();
                    history.load(TimePeriod::Week);
                })
            })
            .collect();
        for caller in callers {
            caller.await.unwrap();
        }

        let state = tokio::time::timeout(Duration::from_secs(2), history.wait_idle())
            .await
            .expect("history stayed loading after concurrent loads");
        assert!(state.error.is_none());
        assert!(state.has_data());
    }
}

#[tokio::test]
async fn test_cancel_discards_in_flight_request() {
    let service = SlowService::new(Duration::from_millis(100));
    let completed = Arc::clone(&service.completed);
    let history = HistoryCoordinator::new(service, TimePeriod::Week);

    history.load(TimePeriod::Week);
    history.cancel();
    assert!(!history.state().is_loading);

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(!history.state().has_data());
    assert_eq!(completed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_drop_aborts_in_flight_request() {
    let service = SlowService::new(Duration::from_millis(100));
    let completed = Arc::clone(&service.completed);
    let history = HistoryCoordinator::new(service, TimePeriod::Week);

    history.load(TimePeriod::Month);
    drop(history);

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(completed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_refresh_uses_last_period() {
    let history = HistoryCoordinator::new(
        ScriptedService::new(vec![
            Ok(AnalyticsPayload::default()),
            Ok(AnalyticsPayload::default()),
        ]),
        TimePeriod::Week,
    );
    assert_eq!(history.current_period(), TimePeriod::Week);

    history.load(TimePeriod::Year);
    history.wait_idle().await;
    assert_eq!(history.current_period(), TimePeriod::Year);

    history.refresh();
    let state = history.wait_idle().await;
    assert_eq!(state.period, Some(TimePeriod::Year));
}
