//! One chart on screen: fetch, adapt, hold the result
//!
//! A panel owns at most one in-flight fetch task. Remounting, changing the
//! group, refreshing, unmounting or dropping the panel aborts that task, and a
//! generation counter guarantees a response that finishes anyway is discarded
//! instead of landing in the slot of a newer request.

use crate::metrics::{fetch_visual, MetricId};
use crate::models::{GroupId, ThemePreference, Visual};
use crate::source::MetricSource;
use crate::theme::{ThemeSubscription, ThemeWatcher};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Lifecycle of a panel's data for the current mount and group
#[derive(Debug, Clone, Default)]
pub enum FetchState {
    /// Not mounted, or no group to query
    #[default]
    Idle,
    Loading,
    Loaded {
        visual: Arc<Visual>,
        fetched_at: DateTime<Utc>,
    },
    /// Terminal for this mount/group; the panel shows its empty default
    Failed { error: String },
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Loaded or failed
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchState::Loaded { .. } | FetchState::Failed { .. })
    }

    pub fn visual(&self) -> Option<&Arc<Visual>> {
        match self {
            FetchState::Loaded { visual, .. } => Some(visual),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// A mounted (or mountable) metric view
pub struct Panel {
    metric: MetricId,
    source: Arc<dyn MetricSource>,
    themes: Arc<ThemeWatcher>,
    group: Option<GroupId>,
    state: Arc<watch::Sender<FetchState>>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
    theme: Option<ThemeSubscription>,
}

impl Panel {
    pub fn new(
        metric: MetricId,
        source: Arc<dyn MetricSource>,
        themes: Arc<ThemeWatcher>,
        group: Option<GroupId>,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            metric,
            source,
            themes,
            group,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
            theme: None,
        }
    }

    pub fn metric(&self) -> MetricId {
        self.metric
    }

    pub fn group(&self) -> Option<&GroupId> {
        self.group.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.theme.is_some()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// Observe state transitions (used by tests and redraw triggers)
    pub fn subscribe_state(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Theme this panel renders with
    pub fn theme(&self) -> ThemePreference {
        self.theme
            .as_ref()
            .map(ThemeSubscription::current)
            .unwrap_or_else(|| self.themes.current())
    }

    /// Subscribe to the theme and issue the fetch. No-op when already mounted.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }
        self.theme = Some(self.themes.subscribe());
        debug!(metric = %self.metric, "Panel mounted");
        self.start_fetch();
    }

    /// Cancel any in-flight fetch, drop the theme subscription, reset to idle
    pub fn unmount(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.cancel();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(FetchState::Idle);
        self.theme = None;
        debug!(metric = %self.metric, "Panel unmounted");
    }

    /// Point the panel at another group. Returns false when nothing changed.
    pub fn set_group(&mut self, group: Option<GroupId>) -> bool {
        if self.group == group {
            return false;
        }
        self.group = group;
        if self.is_mounted() {
            self.start_fetch();
        }
        true
    }

    /// Re-issue the fetch for the current group
    pub fn refresh(&mut self) {
        if self.is_mounted() {
            self.start_fetch();
        }
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn start_fetch(&mut self) {
        self.cancel();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(group) = self.group.clone() else {
            self.state.send_replace(FetchState::Idle);
            return;
        };

        self.state.send_replace(FetchState::Loading);

        let metric = self.metric;
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);

        self.task = Some(tokio::spawn(async move {
            let next = match fetch_visual(source.as_ref(), metric, &group).await {
                Ok(visual) => {
                    debug!(%metric, %group, points = visual.len(), "Metric loaded");
                    FetchState::Loaded {
                        visual: Arc::new(visual),
                        fetched_at: Utc::now(),
                    }
                }
                Err(e) => {
                    warn!(%metric, %group, kind = e.kind(), error = %e, "Metric fetch failed");
                    FetchState::Failed {
                        error: e.to_string(),
                    }
                }
            };

            let applied = state.send_if_modified(|slot| {
                if current.load(Ordering::SeqCst) == generation {
                    *slot = next;
                    true
                } else {
                    false
                }
            });

            if !applied {
                debug!(%metric, %group, "Discarded stale metric response");
            }
        }));
    }
}

impl Drop for Panel {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use serde_json::json;

    struct StaticSource(serde_json::Value);

    #[async_trait]
    impl MetricSource for StaticSource {
        async fn fetch_json(
            &self,
            _path: &str,
            _group: &GroupId,
        ) -> Result<serde_json::Value, FetchError> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static".into()
        }
    }

    fn panel(group: Option<&str>) -> Panel {
        Panel::new(
            MetricId::TopBots,
            Arc::new(StaticSource(json!([{"bot_name": "@a", "command_count": 3}]))),
            Arc::new(ThemeWatcher::default()),
            group.map(GroupId::from),
        )
    }

    #[tokio::test]
    async fn test_unmounted_panel_stays_idle() {
        let panel = panel(Some("1"));
        assert!(matches!(panel.state(), FetchState::Idle));
        assert!(!panel.is_mounted());
    }

    #[tokio::test]
    async fn test_mount_without_group_issues_no_fetch() {
        let mut panel = panel(None);
        panel.mount();
        assert!(panel.is_mounted());
        assert!(matches!(panel.state(), FetchState::Idle));
    }

    #[tokio::test]
    async fn test_mount_loads_visual() {
        let mut panel = panel(Some("1"));
        panel.mount();
        let mut rx = panel.subscribe_state();
        let state = rx.wait_for(FetchState::is_settled).await.unwrap().clone();
        assert_eq!(state.visual().map(|v| v.len()), Some(1));
    }

    #[tokio::test]
    async fn test_set_same_group_is_noop() {
        let mut panel = panel(Some("1"));
        assert!(!panel.set_group(Some(GroupId::from("1"))));
        assert!(panel.set_group(Some(GroupId::from("2"))));
        // Not mounted: group changes do not fetch
        assert!(matches!(panel.state(), FetchState::Idle));
    }

    #[tokio::test]
    async fn test_theme_subscription_follows_mount() {
        let themes = Arc::new(ThemeWatcher::new(ThemePreference::Dark));
        let mut panel = Panel::new(
            MetricId::TopBots,
            Arc::new(StaticSource(json!([]))),
            Arc::clone(&themes),
            None,
        );

        panel.mount();
        assert_eq!(themes.subscriber_count(), 1);
        themes.toggle();
        assert_eq!(panel.theme(), ThemePreference::Light);

        panel.unmount();
        assert_eq!(themes.subscriber_count(), 0);
    }
}
