//! Data models shared by sources, panels and renderers

pub mod chart;
pub mod group;
pub mod theme;

pub use chart::{ChartData, ChartKind, Dataset, Leaderboard, LeaderboardRow, MetricSeries, TimePoint, Visual};
pub use group::GroupId;
pub use theme::ThemePreference;
