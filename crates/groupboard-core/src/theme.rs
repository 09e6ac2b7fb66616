//! Process-wide theme watcher using tokio::watch
//!
//! One watcher is created at startup and handed to every panel; panels hold
//! a [`ThemeSubscription`] while mounted and drop it on unmount.

use crate::models::ThemePreference;
use tokio::sync::watch;
use tracing::debug;

/// Shared light/dark state with change notification
pub struct ThemeWatcher {
    sender: watch::Sender<ThemePreference>,
}

impl ThemeWatcher {
    pub fn new(initial: ThemePreference) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Start from the environment-derived preference
    pub fn detect() -> Self {
        Self::new(ThemePreference::detect())
    }

    pub fn current(&self) -> ThemePreference {
        *self.sender.borrow()
    }

    /// Change the theme; subscribers are only woken on an actual change
    pub fn set(&self, theme: ThemePreference) {
        let changed = self.sender.send_if_modified(|current| {
            if *current == theme {
                false
            } else {
                *current = theme;
                true
            }
        });
        if changed {
            debug!(theme = theme.name(), "Theme changed");
        }
    }

    /// Flip light/dark and return the new value
    pub fn toggle(&self) -> ThemePreference {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    pub fn subscribe(&self) -> ThemeSubscription {
        ThemeSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions (mounted panels plus any other observers)
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ThemeWatcher {
    fn default() -> Self {
        Self::new(ThemePreference::default())
    }
}

/// Live view of the theme; dropping it unsubscribes
pub struct ThemeSubscription {
    receiver: watch::Receiver<ThemePreference>,
}

impl ThemeSubscription {
    pub fn current(&self) -> ThemePreference {
        *self.receiver.borrow()
    }

    /// True if the theme changed since the last `mark_seen`/`changed`
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    pub fn mark_seen(&mut self) -> ThemePreference {
        *self.receiver.borrow_and_update()
    }

    /// Wait for the next change; `None` once the watcher is gone
    pub async fn changed(&mut self) -> Option<ThemePreference> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }
}
