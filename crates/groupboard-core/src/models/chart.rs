//! Chart-ready shapes produced by metric adapters
//!
//! Every adapter output ends up as a [`Visual`]: either labelled chart data
//! or a ranked leaderboard. Renderers never see raw API payloads.

use crate::error::ShapeError;
use serde::{Deserialize, Serialize};

/// How a visual is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
    Leaderboard,
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Leaderboard => "leaderboard",
        }
    }
}

/// Ordered `(label, value)` pairs for one chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub name: String,
    pub points: Vec<(String, f64)>,
}

impl MetricSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push((label.into(), value));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|(_, v)| v).sum()
    }

    /// Split into the `{labels, datasets}` chart shape.
    ///
    /// Cannot fail: labels and values come from the same pairs.
    pub fn into_chart(self, kind: ChartKind) -> ChartData {
        let (labels, values): (Vec<String>, Vec<f64>) = self.points.into_iter().unzip();
        ChartData {
            kind,
            labels,
            datasets: vec![Dataset {
                name: self.name,
                values,
            }],
        }
    }
}

/// A `{time, value}` sample for line charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub time: String,
    pub value: f64,
}

impl TimePoint {
    pub fn series(name: impl Into<String>, points: Vec<TimePoint>) -> MetricSeries {
        MetricSeries {
            name: name.into(),
            points: points.into_iter().map(|p| (p.time, p.value)).collect(),
        }
    }
}

/// One named value column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub values: Vec<f64>,
}

/// `{labels, datasets}`: the shape charting widgets consume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Build chart data, rejecting datasets whose length differs from the labels
    pub fn new(
        kind: ChartKind,
        labels: Vec<String>,
        datasets: Vec<Dataset>,
    ) -> Result<Self, ShapeError> {
        if let Some(bad) = datasets.iter().find(|d| d.values.len() != labels.len()) {
            return Err(ShapeError::LengthMismatch {
                dataset: bad.name.clone(),
                labels: labels.len(),
                values: bad.values.len(),
            });
        }

        Ok(Self {
            kind,
            labels,
            datasets,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Values of the first dataset (the only one for single-series charts)
    pub fn primary_values(&self) -> &[f64] {
        self.datasets
            .first()
            .map(|d| d.values.as_slice())
            .unwrap_or(&[])
    }

    /// Sum of the first dataset, used as the doughnut total
    pub fn total(&self) -> f64 {
        self.primary_values().iter().sum()
    }

    /// Largest value across all datasets (axis bound helper)
    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Re-zip the first dataset with the labels
    pub fn to_series(&self) -> MetricSeries {
        MetricSeries {
            name: self
                .datasets
                .first()
                .map(|d| d.name.clone())
                .unwrap_or_default(),
            points: self
                .labels
                .iter()
                .cloned()
                .zip(self.primary_values().iter().copied())
                .collect(),
        }
    }
}

/// One ranked row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// 1-based position
    pub rank: usize,
    pub name: String,
    pub value: f64,
}

/// Ranked table of members or bots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub value_label: String,
    pub rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Rank entries in the order given (the API returns them pre-sorted)
    pub fn ranked<I>(value_label: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            value_label: value_label.into(),
            rows: entries
                .into_iter()
                .enumerate()
                .map(|(i, (name, value))| LeaderboardRow {
                    rank: i + 1,
                    name,
                    value,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything a renderer can draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Visual {
    Chart(ChartData),
    Leaderboard(Leaderboard),
}

impl Visual {
    pub fn kind(&self) -> ChartKind {
        match self {
            Visual::Chart(chart) => chart.kind,
            Visual::Leaderboard(_) => ChartKind::Leaderboard,
        }
    }

    /// Number of data points (labels or rows)
    pub fn len(&self) -> usize {
        match self {
            Visual::Chart(chart) => chart.len(),
            Visual::Leaderboard(board) => board.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten to `(label, value)` pairs for tables and exports
    pub fn to_series(&self) -> MetricSeries {
        match self {
            Visual::Chart(chart) => chart.to_series(),
            Visual::Leaderboard(board) => MetricSeries {
                name: board.value_label.clone(),
                points: board
                    .rows
                    .iter()
                    .map(|r| (r.name.clone(), r.value))
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_data_rejects_length_mismatch() {
        let err = ChartData::new(
            ChartKind::Bar,
            vec!["a".into(), "b".into()],
            vec![Dataset {
                name: "Messages".into(),
                values: vec![1.0],
            }],
        )
        .unwrap_err();

        assert_eq!(
            err,
            ShapeError::LengthMismatch {
                dataset: "Messages".into(),
                labels: 2,
                values: 1,
            }
        );
    }

    #[test]
    fn test_series_into_chart_keeps_order() {
        let mut series = MetricSeries::new("Messages");
        series.push("2024-01-02", 3.0);
        series.push("2024-01-01", 5.0);

        let chart = series.into_chart(ChartKind::Line);
        assert_eq!(chart.labels, vec!["2024-01-02", "2024-01-01"]);
        assert_eq!(chart.primary_values(), &[3.0, 5.0]);
        assert_eq!(chart.max_value(), 5.0);
        assert_eq!(chart.total(), 8.0);
    }

    #[test]
    fn test_leaderboard_ranks_are_one_based() {
        let board = Leaderboard::ranked(
            "Messages",
            vec![("alice".to_string(), 40.0), ("bob".to_string(), 12.0)],
        );
        assert_eq!(board.rows[0].rank, 1);
        assert_eq!(board.rows[1].rank, 2);
        assert_eq!(Visual::Leaderboard(board).kind(), ChartKind::Leaderboard);
    }

    #[test]
    fn test_empty_chart_has_zero_total() {
        let chart = MetricSeries::new("x").into_chart(ChartKind::Doughnut);
        assert!(chart.is_empty());
        assert_eq!(chart.total(), 0.0);
        assert_eq!(chart.max_value(), 0.0);
    }
}
