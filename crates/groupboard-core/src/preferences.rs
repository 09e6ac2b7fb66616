//! User preferences persistence for groupboard
//!
//! Stores UI preferences (theme, last group) in `<cache_dir>/preferences.json`.

use crate::models::{GroupId, ThemePreference};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

/// groupboard-specific user preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Theme chosen in the TUI, overrides detection
    #[serde(default)]
    pub theme: Option<ThemePreference>,

    /// Group that was on screen when the TUI exited
    #[serde(default)]
    pub last_group: Option<GroupId>,
}

impl Preferences {
    /// Default location: `<cache_dir>/groupboard`
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("groupboard"))
    }

    /// Load preferences from `<cache_dir>/preferences.json`.
    /// Returns defaults on any I/O or parse error.
    pub fn load(cache_dir: &Path) -> Self {
        let path = cache_dir.join(PREFERENCES_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist preferences to `<cache_dir>/preferences.json`.
    pub fn save(&self, cache_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(cache_dir)
            .context("Failed to create cache directory for preferences")?;
        let path = cache_dir.join(PREFERENCES_FILE);
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize preferences")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write preferences to {}", path.display()))
    }
}
