//! TUI application state and key handling

use crate::components::Spinner;
use groupboard_core::models::ThemePreference;
use groupboard_core::{Dashboard, Preferences};
use std::path::PathBuf;
use tracing::{info, warn};

pub struct App {
    pub dashboard: Dashboard,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub spinner: Spinner,
    prefs_dir: Option<PathBuf>,
    /// Theme was chosen by the user rather than detected; only then is it saved
    theme_pinned: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, prefs_dir: Option<PathBuf>) -> Self {
        Self {
            dashboard,
            should_quit: false,
            status_message: None,
            spinner: Spinner::new(),
            prefs_dir,
            theme_pinned: false,
        }
    }

    /// Mark the startup theme as an explicit choice (flag or saved preference)
    pub fn with_pinned_theme(mut self, pinned: bool) -> Self {
        self.theme_pinned = pinned;
        self
    }

    pub fn theme(&self) -> ThemePreference {
        self.dashboard.themes().current()
    }

    /// Handle a key press. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: crossterm::event::KeyCode) -> bool {
        use crossterm::event::KeyCode;

        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                true
            }
            KeyCode::Tab => {
                self.dashboard.next_tab();
                true
            }
            KeyCode::BackTab => {
                self.dashboard.prev_tab();
                true
            }
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                let idx = (c as usize) - ('1' as usize);
                if idx < self.dashboard.tabs().len() {
                    self.dashboard.select_tab(idx);
                    true
                } else {
                    false
                }
            }
            KeyCode::Char('g') => {
                self.dashboard.next_group();
                self.announce_group();
                true
            }
            KeyCode::Char('G') => {
                self.dashboard.prev_group();
                self.announce_group();
                true
            }
            KeyCode::Char('r') | KeyCode::F(5) => {
                self.dashboard.refresh();
                self.status_message = Some("Refreshing…".to_string());
                true
            }
            KeyCode::Char('t') => {
                let theme = self.dashboard.themes().toggle();
                self.theme_pinned = true;
                self.status_message = Some(format!("Theme: {}", theme.name()));
                true
            }
            _ => false,
        }
    }

    fn announce_group(&mut self) {
        self.status_message = Some(match self.dashboard.group() {
            Some(group) => format!("Group {}", group),
            None => "No groups configured (add `groups` to config.toml)".to_string(),
        });
    }

    /// Persist theme and group for the next session
    pub fn save_preferences(&self) {
        let Some(dir) = &self.prefs_dir else {
            return;
        };
        let prefs = Preferences {
            theme: self.theme_pinned.then(|| self.theme()),
            last_group: self.dashboard.group().cloned(),
        };
        match prefs.save(dir) {
            Ok(()) => info!(path = %dir.display(), "Preferences saved"),
            Err(e) => warn!(error = %e, "Failed to save preferences"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use groupboard_core::models::GroupId;
    use groupboard_core::{Domain, FixtureSource, ThemeWatcher};
    use std::sync::Arc;

    fn app(groups: &[&str]) -> App {
        let dashboard = Dashboard::new(
            Arc::new(FixtureSource::new("/nonexistent")),
            Arc::new(ThemeWatcher::new(ThemePreference::Dark)),
            groups.iter().map(|g| GroupId::from(*g)).collect(),
            None,
        );
        App::new(dashboard, None)
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut app = app(&[]);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_tab_keys() {
        let mut app = app(&[]);
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.dashboard.active_domain(), Domain::Bots);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.dashboard.active_domain(), Domain::Messages);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.dashboard.active_domain(), Domain::Bots);
        assert!(!app.handle_key(KeyCode::Char('9')));
    }

    #[tokio::test]
    async fn test_theme_toggle_reaches_watcher() {
        let mut app = app(&[]);
        app.handle_key(KeyCode::Char('t'));
        assert_eq!(app.theme(), ThemePreference::Light);
        assert_eq!(app.status_message.as_deref(), Some("Theme: light"));
    }

    #[tokio::test]
    async fn test_group_cycle_without_groups() {
        let mut app = app(&[]);
        app.handle_key(KeyCode::Char('g'));
        assert!(app.dashboard.group().is_none());
        assert!(app.status_message.unwrap().starts_with("No groups"));
    }

    #[tokio::test]
    async fn test_group_cycle() {
        let mut app = app(&["10", "20"]);
        app.handle_key(KeyCode::Char('g'));
        assert_eq!(app.dashboard.group(), Some(&GroupId::from("10")));
        app.handle_key(KeyCode::Char('G'));
        assert_eq!(app.dashboard.group(), Some(&GroupId::from("20")));
    }

    #[tokio::test]
    async fn test_detected_theme_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&["10"]);
        app.prefs_dir = Some(dir.path().to_path_buf());
        app.handle_key(KeyCode::Char('g'));
        app.save_preferences();

        let prefs = Preferences::load(dir.path());
        assert_eq!(prefs.theme, None);
        assert_eq!(prefs.last_group, Some(GroupId::from("10")));
    }

    #[tokio::test]
    async fn test_pinned_theme_saved_without_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&[]).with_pinned_theme(true);
        app.prefs_dir = Some(dir.path().to_path_buf());
        app.save_preferences();

        assert_eq!(
            Preferences::load(dir.path()).theme,
            Some(ThemePreference::Dark)
        );
    }

    #[tokio::test]
    async fn test_save_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&["10"]);
        app.prefs_dir = Some(dir.path().to_path_buf());
        app.handle_key(KeyCode::Char('g'));
        app.handle_key(KeyCode::Char('t'));
        app.save_preferences();

        let prefs = Preferences::load(dir.path());
        assert_eq!(prefs.theme, Some(ThemePreference::Light));
        assert_eq!(prefs.last_group, Some(GroupId::from("10")));
    }
}
