//! Unified theme and color system for groupboard TUI
//!
//! Provides consistent color language across all panels:
//! - 🟢 Green: Loaded, Success
//! - 🔴 Red: Failed, Error
//! - 🟡 Yellow: Loading, Attention
//! - ⚪ Gray: Idle, Neutral
//! - 🔵 Cyan: Selected, Focus, Interactive
//! - 🟣 Magenta: Leaders, Important

use groupboard_core::models::ThemePreference;
use groupboard_core::FetchState;
use ratatui::style::Color;

/// Status color palette following k9s/lazygit conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Success,
    Error,
    Warning,
    Neutral,
    Focus,
    Important,
}

impl StatusColor {
    /// Convert to Ratatui Color based on theme
    pub fn to_color(self, theme: ThemePreference) -> Color {
        match theme {
            ThemePreference::Dark => match self {
                StatusColor::Success => Color::Green,
                StatusColor::Error => Color::Red,
                StatusColor::Warning => Color::Yellow,
                StatusColor::Neutral => Color::DarkGray,
                StatusColor::Focus => Color::Cyan,
                StatusColor::Important => Color::Magenta,
            },
            ThemePreference::Light => match self {
                StatusColor::Success => Color::Rgb(0, 128, 0), // Dark green
                StatusColor::Error => Color::Rgb(200, 0, 0),   // Dark red
                StatusColor::Warning => Color::Rgb(180, 120, 0), // Dark yellow/orange
                StatusColor::Neutral => Color::Gray,
                StatusColor::Focus => Color::Rgb(0, 128, 128), // Dark cyan
                StatusColor::Important => Color::Rgb(128, 0, 128), // Dark magenta
            },
        }
    }
}

/// Panel fetch state semantic color
pub enum FetchStateColor {
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl FetchStateColor {
    pub fn from_state(state: &FetchState) -> Self {
        match state {
            FetchState::Idle => FetchStateColor::Idle,
            FetchState::Loading => FetchStateColor::Loading,
            FetchState::Loaded { .. } => FetchStateColor::Loaded,
            FetchState::Failed { .. } => FetchStateColor::Failed,
        }
    }

    pub fn to_color(self, theme: ThemePreference) -> Color {
        match self {
            FetchStateColor::Idle => StatusColor::Neutral.to_color(theme),
            FetchStateColor::Loading => StatusColor::Warning.to_color(theme),
            FetchStateColor::Loaded => StatusColor::Success.to_color(theme),
            FetchStateColor::Failed => StatusColor::Error.to_color(theme),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FetchStateColor::Idle => "○",
            FetchStateColor::Loading => "◌",
            FetchStateColor::Loaded => "●",
            FetchStateColor::Failed => "✗",
        }
    }
}

/// Colors for doughnut slices and multi-series charts, cycled by index
pub struct SeriesPalette;

impl SeriesPalette {
    pub fn color(index: usize, theme: ThemePreference) -> Color {
        const ORDER: [StatusColor; 5] = [
            StatusColor::Focus,
            StatusColor::Success,
            StatusColor::Warning,
            StatusColor::Important,
            StatusColor::Error,
        ];
        ORDER[index % ORDER.len()].to_color(theme)
    }
}

/// Leaderboard podium coloring
pub enum RankColor {
    Top,
    Podium,
    Rest,
}

impl RankColor {
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            1 => RankColor::Top,
            2 | 3 => RankColor::Podium,
            _ => RankColor::Rest,
        }
    }

    pub fn to_color(self, theme: ThemePreference) -> Color {
        match self {
            RankColor::Top => StatusColor::Important.to_color(theme),
            RankColor::Podium => StatusColor::Focus.to_color(theme),
            RankColor::Rest => BaseColors::fg(theme),
        }
    }
}

/// Focus state colors
pub struct FocusStyle;

impl FocusStyle {
    pub fn focused_border(theme: ThemePreference) -> Color {
        StatusColor::Focus.to_color(theme)
    }

    pub fn unfocused_border(theme: ThemePreference) -> Color {
        StatusColor::Neutral.to_color(theme)
    }
}

/// Base color helpers for backgrounds and foregrounds
pub struct BaseColors;

impl BaseColors {
    pub fn bg(theme: ThemePreference) -> Color {
        match theme {
            ThemePreference::Dark => Color::Black,
            ThemePreference::Light => Color::White,
        }
    }

    pub fn fg(theme: ThemePreference) -> Color {
        match theme {
            ThemePreference::Dark => Color::White,
            ThemePreference::Light => Color::Black,
        }
    }

    /// Muted/secondary text color
    pub fn muted(theme: ThemePreference) -> Color {
        match theme {
            ThemePreference::Dark => Color::DarkGray,
            ThemePreference::Light => Color::Gray,
        }
    }
}
