//! Panel lifecycle: loading, failure absorption, cancellation, stale responses

use async_trait::async_trait;
use groupboard_core::models::GroupId;
use groupboard_core::{FetchError, FetchState, MetricId, MetricSource, Panel, ThemeWatcher};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Answers `bots/top-bots` with one bot named after the group, after a per-group delay
#[derive(Default)]
struct DelayedSource {
    delays: HashMap<String, Duration>,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl DelayedSource {
    fn with_delays(delays: &[(&str, u64)]) -> Self {
        Self {
            delays: delays
                .iter()
                .map(|(g, ms)| (g.to_string(), Duration::from_millis(*ms)))
                .collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl MetricSource for DelayedSource {
    async fn fetch_json(&self, _path: &str, group: &GroupId) -> Result<Value, FetchError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.get(group.as_str()).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(json!([{"bot_name": format!("bot-{}", group), "command_count": 1}]))
    }

    fn describe(&self) -> String {
        "delayed".into()
    }
}

struct FailingSource;

#[async_trait]
impl MetricSource for FailingSource {
    async fn fetch_json(&self, path: &str, _group: &GroupId) -> Result<Value, FetchError> {
        Err(FetchError::Status {
            url: format!("http://analytics/graphs/{}", path),
            status: 503,
        })
    }

    fn describe(&self) -> String {
        "failing".into()
    }
}

async fn settled(panel: &Panel) -> FetchState {
    let mut rx = panel.subscribe_state();
    let state = rx.wait_for(FetchState::is_settled).await.unwrap().clone();
    state
}

fn first_name(state: &FetchState) -> String {
    state.visual().unwrap().to_series().points[0].0.clone()
}

#[tokio::test]
async fn test_fetch_rejection_leaves_default_state() {
    let mut panel = Panel::new(
        MetricId::TopSenders,
        Arc::new(FailingSource),
        Arc::new(ThemeWatcher::default()),
        Some(GroupId::from("1")),
    );
    panel.mount();

    let state = settled(&panel).await;
    assert!(state.visual().is_none());
    assert!(state.error().unwrap().contains("HTTP 503"));
    assert!(panel.is_mounted());
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_never_overwrites_newer_group() {
    let source = Arc::new(DelayedSource::with_delays(&[("slow", 500), ("fast", 10)]));
    let mut panel = Panel::new(
        MetricId::TopBots,
        source.clone(),
        Arc::new(ThemeWatcher::default()),
        Some(GroupId::from("slow")),
    );

    panel.mount();
    tokio::task::yield_now().await;
    assert!(panel.set_group(Some(GroupId::from("fast"))));

    let state = settled(&panel).await;
    assert_eq!(first_name(&state), "bot-fast");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(first_name(&panel.state()), "bot-fast");
    assert_eq!(source.completed.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_in_flight_fetch() {
    let source = Arc::new(DelayedSource::with_delays(&[("1", 300)]));
    let themes = Arc::new(ThemeWatcher::default());
    let mut panel = Panel::new(
        MetricId::TopBots,
        source.clone(),
        themes.clone(),
        Some(GroupId::from("1")),
    );

    panel.mount();
    assert!(panel.state().is_loading());
    tokio::task::yield_now().await;

    panel.unmount();
    assert!(matches!(panel.state(), FetchState::Idle));
    assert_eq!(themes.subscriber_count(), 0);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(matches!(panel.state(), FetchState::Idle));
    assert_eq!(source.completed.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_in_flight_fetch() {
    let source = Arc::new(DelayedSource::with_delays(&[("1", 300)]));
    let mut panel = Panel::new(
        MetricId::TopBots,
        source.clone(),
        Arc::new(ThemeWatcher::default()),
        Some(GroupId::from("1")),
    );
    panel.mount();
    tokio::task::yield_now().await;
    drop(panel);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(source.completed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_refresh_refetches_same_group() {
    let source = Arc::new(DelayedSource::default());
    let mut panel = Panel::new(
        MetricId::TopBots,
        source.clone(),
        Arc::new(ThemeWatcher::default()),
        Some(GroupId::from("1")),
    );

    panel.mount();
    settled(&panel).await;
    panel.refresh();
    assert!(panel.state().is_loading());
    settled(&panel).await;

    assert_eq!(source.started.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_remount_after_unmount_fetches_again() {
    let source = Arc::new(DelayedSource::default());
    let mut panel = Panel::new(
        MetricId::TopBots,
        source.clone(),
        Arc::new(ThemeWatcher::default()),
        Some(GroupId::from("1")),
    );

    panel.mount();
    settled(&panel).await;
    panel.unmount();
    panel.mount();
    let state = settled(&panel).await;

    assert_eq!(first_name(&state), "bot-1");
    assert_eq!(source.started.load(Ordering::SeqCst), 2);
}
