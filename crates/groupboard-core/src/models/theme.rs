//! Light/dark rendering preference

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Env var forcing a theme regardless of terminal detection
pub const THEME_ENV: &str = "GROUPBOARD_THEME";

/// Two-valued rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    /// Dark theme (default): Black bg, White fg
    #[default]
    Dark,
}

impl ThemePreference {
    /// Derive the preference from the environment.
    ///
    /// `GROUPBOARD_THEME` wins; otherwise the terminal's `COLORFGBG`
    /// background index decides; otherwise dark.
    pub fn detect() -> Self {
        Self::from_env_values(
            std::env::var(THEME_ENV).ok().as_deref(),
            std::env::var("COLORFGBG").ok().as_deref(),
        )
    }

    fn from_env_values(forced: Option<&str>, colorfgbg: Option<&str>) -> Self {
        if let Some(theme) = forced.and_then(|v| v.parse().ok()) {
            return theme;
        }

        // COLORFGBG is "fg;bg" or "fg;default;bg"; the last field is the background
        match colorfgbg.and_then(|v| v.rsplit(';').next()) {
            Some("7") | Some("15") => ThemePreference::Light,
            _ => ThemePreference::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(format!("unknown theme '{}' (expected light|dark)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_theme_wins() {
        assert_eq!(
            ThemePreference::from_env_values(Some("light"), Some("15;0")),
            ThemePreference::Light
        );
    }

    #[test]
    fn test_colorfgbg_background() {
        assert_eq!(
            ThemePreference::from_env_values(None, Some("0;15")),
            ThemePreference::Light
        );
        assert_eq!(
            ThemePreference::from_env_values(None, Some("15;default;0")),
            ThemePreference::Dark
        );
        assert_eq!(
            ThemePreference::from_env_values(Some("purple"), None),
            ThemePreference::Dark
        );
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ThemePreference::Dark.toggled(), ThemePreference::Light);
        assert_eq!(ThemePreference::Light.toggled().name(), "dark");
    }
}
